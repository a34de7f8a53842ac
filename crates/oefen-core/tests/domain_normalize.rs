use oefen_core::{normalize_domain, CurriculumDomain, InteractionKind, Level};
use proptest::prelude::*;

#[test]
fn snake_and_kebab_forms_meet() {
    assert_eq!(
        normalize_domain("getal_en_bewerkingen"),
        normalize_domain("getal-en-bewerkingen")
    );
    assert_eq!(normalize_domain("meten_en_meetkunde"), "meten-en-meetkunde");
}

#[test]
fn domain_slugs_resolve_in_both_forms() {
    assert_eq!(
        CurriculumDomain::from_slug("meten_en_meetkunde"),
        Some(CurriculumDomain::MeasurementGeometry)
    );
    assert_eq!(
        CurriculumDomain::from_slug("verhoudingen"),
        Some(CurriculumDomain::Ratios)
    );
    assert_eq!(CurriculumDomain::from_slug("astronomie"), None);
}

#[test]
fn fallback_task_forms_follow_interaction_kind() {
    assert_eq!(
        InteractionKind::from_tag("numeric").map(|kind| kind.fallback_task_form()),
        Some("numeric_simple")
    );
    assert_eq!(
        InteractionKind::from_tag("mcq").map(|kind| kind.fallback_task_form()),
        Some("select_single")
    );
    assert_eq!(
        InteractionKind::from_tag("fill_blanks").map(|kind| kind.fallback_task_form()),
        Some("fill_single_step")
    );
    assert_eq!(InteractionKind::from_tag("drag_drop"), None);
}

#[test]
fn level_tags_are_closed() {
    for level in Level::ALL {
        assert_eq!(Level::parse(level.as_str()), Some(level));
    }
    assert_eq!(Level::parse("n5"), None);
}

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in "[a-z_-]{0,24}") {
        let once = normalize_domain(&raw);
        prop_assert_eq!(normalize_domain(&once), once.clone());
        prop_assert!(!once.contains('_'));
    }

    #[test]
    fn snake_form_maps_to_kebab_form(parts in proptest::collection::vec("[a-z]{1,8}", 1..5)) {
        let snake = parts.join("_");
        let kebab = parts.join("-");
        prop_assert_eq!(normalize_domain(&snake), kebab);
    }
}
