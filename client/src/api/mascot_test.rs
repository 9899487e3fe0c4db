use super::*;

fn mascot(level: i32, exp: i32) -> Mascot {
    Mascot {
        id: 1,
        name: "Soli".to_owned(),
        mascot_type: "chick".to_owned(),
        level,
        exp,
        equipped_item: None,
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// evolution math
// =============================================================================

#[test]
fn evolution_stage_is_one_per_ten_levels() {
    assert_eq!(mascot(0, 0).evolution_stage(), 0);
    assert_eq!(mascot(9, 0).evolution_stage(), 0);
    assert_eq!(mascot(10, 0).evolution_stage(), 1);
    assert_eq!(mascot(25, 0).evolution_stage(), 2);
}

#[test]
fn exp_to_next_level_counts_down() {
    assert_eq!(mascot(1, 50).exp_to_next_level(), 150);
    assert_eq!(mascot(1, 199).exp_to_next_level(), 1);
}

#[test]
fn exp_to_next_level_floors_at_zero() {
    assert_eq!(mascot(1, 250).exp_to_next_level(), 0);
}

// =============================================================================
// wire format
// =============================================================================

#[test]
fn mascot_deserializes_backend_shape() {
    let parsed: Mascot = serde_json::from_value(serde_json::json!({
        "id": 1,
        "name": "Soli",
        "type": "chick",
        "level": 3,
        "exp": 120,
        "equippedItem": "hat",
    }))
    .unwrap();
    assert_eq!(parsed.mascot_type, "chick");
    assert_eq!(parsed.equipped_item.as_deref(), Some("hat"));
}

#[test]
fn update_request_skips_unset_fields() {
    let update = UpdateMascot {
        name: Some("A".to_owned()),
        equipped_item: None,
    };
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value, serde_json::json!({ "name": "A" }));
}

#[test]
fn create_request_renames_type_field() {
    let create = CreateMascot {
        name: "Soli".to_owned(),
        mascot_type: "chick".to_owned(),
        equipped_item: None,
    };
    let value = serde_json::to_value(&create).unwrap();
    assert_eq!(value, serde_json::json!({ "name": "Soli", "type": "chick" }));
}
