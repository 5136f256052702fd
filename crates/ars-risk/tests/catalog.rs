use std::collections::HashSet;

use ars_core::models::risk::Platform;
use ars_risk::catalog::{InputType, RiskRule};

#[test]
fn group_ids_are_unique() {
    for platform in [Platform::Web, Platform::Ussd] {
        let catalog = ars_risk::catalog(platform);
        let ids: HashSet<u32> = catalog.groups.iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), catalog.groups.len(), "{}", catalog.version);
    }
}

#[test]
fn pair_items_are_offered_options() {
    for platform in [Platform::Web, Platform::Ussd] {
        for group in &ars_risk::catalog(platform).groups {
            for question in &group.questions {
                if let RiskRule::Paired { pairs, .. } = &question.rule {
                    for item in pairs.iter().flatten() {
                        assert!(
                            question.options.contains(item),
                            "group {} option {item:?} missing",
                            group.id
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn active_view_hides_inactive_groups() {
    let view = ars_risk::catalog(Platform::Web).active_view();
    assert!(view.iter().all(|g| g.id != 12));
    assert!(view.iter().any(|g| g.id == 17));

    let json = serde_json::to_value(&view[0]).unwrap();
    assert_eq!(json["questions"][0]["inputType"], "date");
    assert!(json["questions"][0].get("rule").is_none());
}

#[test]
fn sub_question_lookup_ignores_case() {
    let group = ars_risk::catalog(Platform::Web).group(8).unwrap();
    assert_eq!(group.question("B").unwrap().number, "b");
    assert_eq!(group.question("a").unwrap().input_type, InputType::Other);
}
