use charbinder::core::error::CharbinderError;
use charbinder::core::record::{
    AbilityScores, Alignment, CharClass, CharacterRecord, Gender, Race,
};
use charbinder::core::store::Store;
use charbinder::plugins::roster;
use tempfile::tempdir;

fn sample(name: &str, age: &str) -> CharacterRecord {
    CharacterRecord::new(
        name.to_string(),
        Race::Dwarf,
        CharClass::Fighter,
        Gender::Man,
        age.to_string(),
        AbilityScores::new(15, 10, 14, 9, 11, 12),
    )
}

#[test]
fn create_then_get_round_trips_field_for_field() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let mut record = sample("Thorin", "140");
    record.level = Some(5);
    record.alignment = Some(Alignment::LawfulGood);
    record.backstory = Some("Heir to a lost hold.".to_string());
    record.inventory.push("Warhammer".to_string());
    record.session_notes.push("Owes the innkeeper 3gp".to_string());

    roster::create_character(&store, &record).unwrap();
    let loaded = roster::get_character(&store, "Thorin").unwrap();
    assert_eq!(loaded, record);
}

#[test]
fn duplicate_create_is_rejected_and_preserves_the_original() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let original = sample("Thorin", "140");
    roster::create_character(&store, &original).unwrap();

    let imposter = sample("Thorin", "77");
    let err = roster::create_character(&store, &imposter).unwrap_err();
    assert!(matches!(err, CharbinderError::DuplicateName(ref n) if n == "Thorin"));

    // Post-operation state equals the pre-operation value.
    let loaded = roster::get_character(&store, "Thorin").unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.age, "140");
}

#[test]
fn put_overwrites_for_save_after_edit() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let mut record = sample("Thorin", "140");
    roster::create_character(&store, &record).unwrap();

    record.gold = "250".to_string();
    record.level = Some(6);
    roster::put_character(&store, &record).unwrap();

    let loaded = roster::get_character(&store, "Thorin").unwrap();
    assert_eq!(loaded.gold, "250");
    assert_eq!(loaded.level, Some(6));
    assert_eq!(roster::list_characters(&store).unwrap().len(), 1);
}

#[test]
fn delete_is_final() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    roster::create_character(&store, &sample("Thorin", "140")).unwrap();
    roster::delete_character(&store, "Thorin").unwrap();

    let err = roster::get_character(&store, "Thorin").unwrap_err();
    assert!(matches!(err, CharbinderError::NotFound(_)));
    assert!(roster::list_characters(&store).unwrap().is_empty());

    let err = roster::delete_character(&store, "Thorin").unwrap_err();
    assert!(matches!(err, CharbinderError::NotFound(_)));
}

#[test]
fn list_returns_insertion_order() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    for name in ["Zed", "Anna", "Mim"] {
        roster::create_character(&store, &sample(name, "30")).unwrap();
    }
    assert_eq!(
        roster::list_characters(&store).unwrap(),
        vec!["Zed", "Anna", "Mim"]
    );
}

#[test]
fn get_of_missing_name_is_not_found() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();
    let err = roster::get_character(&store, "Nobody").unwrap_err();
    assert!(matches!(err, CharbinderError::NotFound(ref n) if n == "Nobody"));
}

#[test]
fn invalid_record_is_rejected_before_persisting() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let mut record = sample("Thorin", "140");
    record.gold = "plenty".to_string();
    let err = roster::create_character(&store, &record).unwrap_err();
    assert!(matches!(err, CharbinderError::ValidationError(_)));
    assert!(roster::list_characters(&store).unwrap().is_empty());
}
