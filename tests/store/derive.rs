use crud_sim::Record;

use crate::support::{Heritage, TourGuide};

#[test]
fn collection_from_attribute() {
    assert_eq!(Heritage::COLLECTION, "cultural_heritage");
}

#[test]
fn collection_defaults_to_snake_case_plural() {
    assert_eq!(TourGuide::COLLECTION, "tour_guides");
}

#[test]
fn id_accessors_use_marked_field() {
    let mut guide = TourGuide {
        badge: None,
        languages: vec!["it".into(), "en".into()],
    };
    assert_eq!(guide.id(), None);

    guide.set_id("TG-7".into());
    assert_eq!(guide.id(), Some("TG-7"));
    assert_eq!(guide.badge.as_deref(), Some("TG-7"));
    assert!(guide.search_fields().is_empty());
}

#[test]
fn search_fields_in_declaration_order() {
    let site = Heritage::new("Colosseum", "Rome");
    assert_eq!(site.search_fields(), vec!["Colosseum", "Rome"]);
}
