//! Built-in questionnaires. Option lists and pairings shared by both
//! platforms live here so the web and USSD catalogs cannot drift apart on
//! the answers that drive scoring.

pub mod ussd;
pub mod web;

use ars_core::models::risk::RiskLevel;

use crate::catalog::{QuestionGroup, SubQuestion};

pub(crate) const YES: &str = "Yes";
pub(crate) const NO: &str = "No";
pub(crate) const YES_NO: &[&str] = &[YES, NO];
pub(crate) const NONE_OF_THE_ABOVE: &str = "None of the above";

pub(crate) const HEADACHE_OPTIONS: &[&str] = &[
    "Severe headache",
    "Abnormal body movement",
    "Difficulty with seeing",
    "Upper abdominal pain",
    "Leg swelling",
    "Constant (non-stop) headache",
    "Feeling your heart beat fast",
    "Swollen face",
    NONE_OF_THE_ABOVE,
];

pub(crate) const HEADACHE_PAIRS: &[&str] = &[
    "Severe headache,Abnormal body movement",
    "Severe headache,Difficulty with seeing",
    "Severe headache,Upper abdominal pain",
    "Severe headache,Leg swelling",
    "Constant (non-stop) headache,Feeling your heart beat fast,Swollen face",
    "None of the above",
];

pub(crate) const SYMPTOM_OPTIONS: &[&str] = &[
    "Fainting",
    "Severe tiredness",
    "Dizziness",
    "Breathlessness",
    "Palpitations",
    NONE_OF_THE_ABOVE,
];

pub(crate) const FEVER_OPTIONS: &[&str] = &[
    "Fever",
    "Severe body weakness",
    "Severe joint pain",
    "Frequent urination",
    "Pain on urination",
    "Vomiting",
    "Lower abdominal pain",
    NONE_OF_THE_ABOVE,
];

pub(crate) const FEVER_PAIRS: &[&str] = &[
    "Fever,Severe body weakness,Severe joint pain",
    "Fever,Frequent urination,Pain on urination",
    "Fever,Vomiting",
    "Lower abdominal pain,Fever",
    "None of the above",
];

const BREATHLESS_ON_LIGHT_WORK: &str = "Shortness of breath when doing light activities (activities such as sweeping with broomstick; dishwashing)";

pub(crate) const CHRONIC_OPTIONS: &[&str] = &[
    BREATHLESS_ON_LIGHT_WORK,
    "Headache",
    "Swollen feet",
    "Feeling your heart beat fast",
    "Too much water intake",
    "Too much urination",
    "Foamy urine",
    "Dryness of throat",
    "Bone/ Joint pain that comes and goes",
    "Body pain",
    "Body swelling",
    "Restlessness",
    "Easily gets tired when doing small work",
    "Seizures /abnormal body movement",
    "Frequent pregnancy loss",
    "Painful leg or legs swelling",
    "Cough beyond 2 weeks",
    "Sweating heavily at night",
    "Sudden/ Unexplained weight loss",
    NONE_OF_THE_ABOVE,
];

pub(crate) const CHRONIC_PAIRS: &[&str] = &[
    "Shortness of breath when doing light activities (activities such as sweeping with broomstick; dishwashing),Headache,Swollen feet,Feeling your heart beat fast",
    "Too much water intake,Too much urination,Foamy urine,Dryness of throat",
    "Bone/ Joint pain that comes and goes,Body pain,Shortness of breath when doing light activities (activities such as sweeping with broomstick; dishwashing)",
    "Body swelling,Restlessness,Easily gets tired when doing small work, Feeling your heart beat fast",
    "Seizures /abnormal body movement",
    "Frequent pregnancy loss",
    "Painful leg or legs swelling",
    "Cough beyond 2 weeks,Sweating heavily at night,Sudden/ Unexplained weight loss",
    "None of the above",
];

/// "Yes" is high risk. Answering "No" ends the group.
pub(crate) fn screening(number: &str, question: &str) -> SubQuestion {
    SubQuestion::choice(number, question, YES_NO, &[YES], &[], &[NO])
        .breaking_on(&[RiskLevel::Low])
}

pub(crate) fn headache(question: &str) -> QuestionGroup {
    QuestionGroup::new(
        17,
        "Headache and vision",
        vec![SubQuestion::paired(
            "a",
            question,
            HEADACHE_OPTIONS,
            [
                &["Severe headache", "Constant (non-stop) headache"],
                &[],
                &[NONE_OF_THE_ABOVE],
            ],
            HEADACHE_PAIRS,
        )],
    )
}

pub(crate) fn general_symptoms(question: &str) -> QuestionGroup {
    QuestionGroup::new(
        19,
        "General symptoms",
        vec![SubQuestion::paired(
            "a",
            question,
            SYMPTOM_OPTIONS,
            [&["Fainting"], &[], &[NONE_OF_THE_ABOVE]],
            &[],
        )],
    )
}

pub(crate) fn fever(question: &str) -> QuestionGroup {
    QuestionGroup::new(
        20,
        "Fever and infection",
        vec![SubQuestion::paired(
            "a",
            question,
            FEVER_OPTIONS,
            [
                &["Severe body weakness", "Pain on urination"],
                &["Fever", "Lower abdominal pain"],
                &[NONE_OF_THE_ABOVE],
            ],
            FEVER_PAIRS,
        )],
    )
}

pub(crate) fn chronic_conditions(question: &str) -> QuestionGroup {
    QuestionGroup::new(
        22,
        "Existing conditions",
        vec![SubQuestion::paired(
            "a",
            question,
            CHRONIC_OPTIONS,
            [
                &[
                    BREATHLESS_ON_LIGHT_WORK,
                    "Foamy urine",
                    "Body swelling",
                    "Seizures /abnormal body movement",
                    "Cough beyond 2 weeks",
                ],
                &[
                    "Frequent pregnancy loss",
                    "Painful leg or legs swelling",
                ],
                &[NONE_OF_THE_ABOVE],
            ],
            CHRONIC_PAIRS,
        )],
    )
}
