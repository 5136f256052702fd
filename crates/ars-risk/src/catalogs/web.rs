use std::sync::LazyLock;

use ars_core::models::risk::{Platform, RiskLevel};

use super::{chronic_conditions, fever, general_symptoms, headache, screening, NO, YES, YES_NO};
use crate::catalog::{DateUnit, QuestionCatalog, QuestionGroup, SubQuestion};

/// The full questionnaire served to the web client.
pub static CATALOG: LazyLock<QuestionCatalog> = LazyLock::new(|| QuestionCatalog {
    version: "web-2024.1",
    platform: Platform::Web,
    groups: vec![
        QuestionGroup::new(
            1,
            "Personal information",
            vec![SubQuestion::date(
                "a",
                "What is your date of birth?",
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
                    "How many of those births were by caesarean section?",
                    Some(2..=20),
                    Some(1..=1),
                    Some(0..=0),
                ),
            ],
        ),
        QuestionGroup::new(
            3,
            "Pregnancy loss",
            vec![
                screening("a", "Have you ever lost a pregnancy?"),
                SubQuestion::date(
                    "b",
                    "When did you last lose a pregnancy?",
                    DateUnit::Months,
                    0..=6,
                    7..=12,
                    13..=600,
                ),
            ],
        ),
        QuestionGroup::new(
            4,
            "Previous delivery",
            vec![SubQuestion::date(
                "a",
                "When was your last delivery?",
                DateUnit::Months,
                0..=12,
                13..=24,
                25..=600,
            )],
        ),
        QuestionGroup::new(
            5,
            "Current pregnancy",
            vec![SubQuestion::date(
                "a",
                "When was the first day of your last menstrual period?",
                DateUnit::Months,
                10..=12,
                [9],
                0..=8,
            )],
        ),
        QuestionGroup::new(
            6,
            "Current pregnancy",
            vec![SubQuestion::choice(
                "a",
                "Has a health worker told you that you are carrying more than one baby?",
                &[YES, NO, "I don't know"],
                &[],
                &[YES],
                &[NO, "I don't know"],
            )],
        ),
        QuestionGroup::new(
            7,
            "Family history",
            vec![SubQuestion::multi(
                "a",
                "Does anyone in your family have any of the following?",
                &[
                    "Diabetes",
                    "Hypertension",
                    "Sickle cell disease",
                    "Twins",
                    super::NONE_OF_THE_ABOVE,
                ],
                &["Sickle cell disease"],
                &["Diabetes", "Hypertension"],
                &["Twins", super::NONE_OF_THE_ABOVE],
            )],
        ),
        QuestionGroup::new(
            8,
            "Blood pressure",
            vec![
                screening("a", "Have you ever been told you have high blood pressure?"),
                SubQuestion::choice(
                    "b",
                    "Are you taking medication for high blood pressure?",
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
        QuestionGroup::new(
            10,
            "Danger signs",
            vec![SubQuestion::choice(
                "a",
                "Is water or fluid draining from your vagina?",
                YES_NO,
                &[YES],
                &[],
                &[NO],
            )],
        ),
        QuestionGroup::new(
            11,
            "Danger signs",
            vec![SubQuestion::choice(
                "a",
                "Has your baby stopped moving or is it moving less than usual?",
                &[YES, NO, "I have not felt the baby move yet"],
                &[YES],
                &[],
                &[NO, "I have not felt the baby move yet"],
            )],
        ),
        QuestionGroup::new(
            12,
            "Laboratory results",
            vec![SubQuestion::choice(
                "a",
                "What was your last haemoglobin result?",
                &["Below 7", "7 to 10", "Above 10"],
                &["Below 7"],
                &["7 to 10"],
                &["Above 10"],
            )
            .breaking_on(&[RiskLevel::High])],
        )
        .inactive(),
        headache("Do you currently have any of the following?"),
        general_symptoms("Have you experienced any of the following in the last week?"),
        fever("Have you had any of the following in the last two weeks?"),
        chronic_conditions("Do you have any of the following?"),
    ],
});
