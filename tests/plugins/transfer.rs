use charbinder::core::error::CharbinderError;
use charbinder::core::record::{
    AbilityScores, CharClass, CharacterRecord, Gender, Race,
};
use charbinder::core::store::Store;
use charbinder::plugins::{codec, roster, transfer};
use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::thread;
use tempfile::tempdir;

fn elowen(age: &str) -> CharacterRecord {
    CharacterRecord::new(
        "Elowen".to_string(),
        Race::Elf,
        CharClass::Druid,
        Gender::Woman,
        age.to_string(),
        AbilityScores::new(10, 14, 12, 13, 15, 8),
    )
}

/// Bind an ephemeral loopback port and hand the listener to the receiver
/// role on its own thread, exactly as `receive` does with the fixed port.
fn spawn_receiver(
    store: &Store,
) -> (
    std::net::SocketAddr,
    thread::JoinHandle<Result<transfer::TransferReport, CharbinderError>>,
) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let store = store.clone();
    let handle = thread::spawn(move || transfer::receive_character_on(&store, listener));
    (addr, handle)
}

#[test]
fn full_transfer_copies_the_record_and_leaves_the_sender_unchanged() {
    let tmp_a = tempdir().unwrap();
    let tmp_b = tempdir().unwrap();
    let store_a = Store::open(tmp_a.path()).unwrap();
    let store_b = Store::open(tmp_b.path()).unwrap();

    let record = elowen("120");
    roster::create_character(&store_a, &record).unwrap();
    assert!(roster::list_characters(&store_b).unwrap().is_empty());

    let (addr, receiver) = spawn_receiver(&store_b);
    let report = transfer::send_character_to(&store_a, "Elowen", addr).unwrap();
    assert_eq!(report.name, "Elowen");
    assert!(report.bytes > 0);

    let received = receiver.join().unwrap().unwrap();
    assert_eq!(received.name, "Elowen");
    assert_eq!(received.bytes, report.bytes);

    assert_eq!(roster::get_character(&store_b, "Elowen").unwrap(), record);
    assert_eq!(roster::get_character(&store_a, "Elowen").unwrap(), record);
}

#[test]
fn colliding_name_is_rejected_and_the_local_record_wins() {
    let tmp_a = tempdir().unwrap();
    let tmp_b = tempdir().unwrap();
    let store_a = Store::open(tmp_a.path()).unwrap();
    let store_b = Store::open(tmp_b.path()).unwrap();

    let local = elowen("50");
    roster::create_character(&store_b, &local).unwrap();
    roster::create_character(&store_a, &elowen("120")).unwrap();

    let (addr, receiver) = spawn_receiver(&store_b);
    // The sender streams successfully; rejection happens after reconstruction.
    transfer::send_character_to(&store_a, "Elowen", addr).unwrap();

    let err = receiver.join().unwrap().unwrap_err();
    assert!(matches!(err, CharbinderError::DuplicateName(ref n) if n == "Elowen"));

    let kept = roster::get_character(&store_b, "Elowen").unwrap();
    assert_eq!(kept.age, "50");
    assert_eq!(kept, local);
}

#[test]
fn a_dropped_connection_leaves_the_receiver_store_unchanged() {
    let tmp_a = tempdir().unwrap();
    let tmp_b = tempdir().unwrap();
    let store_a = Store::open(tmp_a.path()).unwrap();
    let store_b = Store::open(tmp_b.path()).unwrap();

    roster::create_character(&store_a, &elowen("120")).unwrap();
    let blob = codec::pack_character(&store_a, "Elowen").unwrap();

    let (addr, receiver) = spawn_receiver(&store_b);

    // Sever the connection after 10% of the bytes.
    let cut = blob.len() / 10;
    {
        let mut conn = TcpStream::connect(addr).unwrap();
        conn.write_all(&blob[..cut]).unwrap();
        // Dropping the stream closes the socket mid-archive.
    }

    let err = receiver.join().unwrap().unwrap_err();
    assert!(matches!(err, CharbinderError::CorruptArchive(_)));
    assert!(roster::list_characters(&store_b).unwrap().is_empty());
}

#[test]
fn sender_reports_connection_failure_when_nobody_listens() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();
    roster::create_character(&store, &elowen("120")).unwrap();

    // Bind then drop to get a port that is very likely closed.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let err = transfer::send_character_to(&store, "Elowen", addr).unwrap_err();
    assert!(matches!(err, CharbinderError::ConnectionFailed(_)));
}
