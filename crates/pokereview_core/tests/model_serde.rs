use pokereview_core::{NewReview, Owner, Pokemon, Review};

#[test]
fn pokemon_round_trips_through_json() {
    let pokemon = Pokemon {
        id: 1,
        name: "Pikachu".to_string(),
        birth_date: 788_918_400_000,
    };

    let json = serde_json::to_string(&pokemon).unwrap();
    let back: Pokemon = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pokemon);
}

#[test]
fn review_payloads_carry_both_foreign_keys() {
    let json = r#"{
        "title": "Great!",
        "text": "the very best",
        "rating": 5,
        "pokemon_id": 1,
        "reviewer_id": 1
    }"#;

    let payload: NewReview = serde_json::from_str(json).unwrap();
    assert_eq!(payload.pokemon_id, 1);
    assert_eq!(payload.reviewer_id, 1);
    assert_eq!(payload.rating, 5);

    let stored = Review {
        id: 9,
        title: payload.title.clone(),
        text: payload.text.clone(),
        rating: payload.rating,
        pokemon_id: payload.pokemon_id,
        reviewer_id: payload.reviewer_id,
    };
    let value = serde_json::to_value(&stored).unwrap();
    assert_eq!(value["id"], 9);
    assert_eq!(value["title"], "Great!");
}

#[test]
fn owner_json_uses_snake_case_field_names() {
    let owner = Owner {
        id: 1,
        first_name: "Ash".to_string(),
        last_name: "Ketchum".to_string(),
        gate: "Pallet Town".to_string(),
        country_id: 1,
    };

    let value = serde_json::to_value(&owner).unwrap();
    assert_eq!(value["first_name"], "Ash");
    assert_eq!(value["country_id"], 1);
}
