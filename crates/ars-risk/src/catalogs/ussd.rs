use std::sync::LazyLock;

use ars_core::models::risk::Platform;

use super::{chronic_conditions, fever, general_symptoms, headache, screening, NO, YES, YES_NO};
use crate::catalog::{DateUnit, QuestionCatalog, QuestionGroup, SubQuestion};

/// The shorter questionnaire driven through the gateway flow. Question texts
/// mirror the `Q<group><letter> ` prompts the flow sends.
pub static CATALOG: LazyLock<QuestionCatalog> = LazyLock::new(|| QuestionCatalog {
    version: "ussd-2024.1",
    platform: Platform::Ussd,
    groups: vec![
        QuestionGroup::new(
            1,
            "Personal information",
            vec![SubQuestion::date(
                "a",
                "What year were you born?",
                DateUnit::Years,
                (10..=17).chain(36..=60),
                [],
                18..=35,
            )],
        ),
        QuestionGroup::new(
            2,
            "Obstetric history",
            vec![
                SubQuestion::count(
                    "a",
                    "How many times have you given birth?",
                    Some(5..=20),
                    None,
                    Some(0..=4),
                ),
                SubQuestion::count(
                    "b",
                    "How many by caesarean section?",
                    Some(2..=20),
                    Some(1..=1),
                    Some(0..=0),
                ),
            ],
        ),
        QuestionGroup::new(
            3,
            "Pregnancy loss",
            vec![screening("a", "Have you ever lost a pregnancy?")],
        ),
        QuestionGroup::new(
            6,
            "Current pregnancy",
            vec![SubQuestion::choice(
                "a",
                "Are you carrying more than one baby?",
                &[YES, NO, "I don't know"],
                &[],
                &[YES],
                &[NO, "I don't know"],
            )],
        ),
        QuestionGroup::new(
            8,
            "Blood pressure",
            vec![
                screening("a", "Have you been told you have high blood pressure?"),
                SubQuestion::choice(
                    "b",
                    "Are you taking medication for it?",
                    YES_NO,
                    &[NO],
                    &[YES],
                    &[],
                ),
            ],
        ),
        QuestionGroup::new(
            9,
            "Danger signs",
            vec![SubQuestion::choice(
                "a",
                "Are you bleeding from your vagina?",
                YES_NO,
                &[YES],
                &[],
                &[NO],
            )],
        ),
        headache("Do you have any of these?"),
        general_symptoms("In the last week, have you had any of these?"),
        fever("In the last two weeks, have you had any of these?"),
        chronic_conditions("Do you have any of these conditions?"),
    ],
});
