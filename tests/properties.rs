use datefmt::{
    DateField, DateFormat, FIELD_COUNT, FormatterKind, Locale, PATTERN_CHARS, Style, StyleCode,
    StyleError, StyleResolver, Timestamp,
};
use proptest::prelude::*;

fn level() -> impl Strategy<Value = Option<Style>> {
    prop_oneof![
        Just(None),
        Just(Some(Style::Full)),
        Just(Some(Style::Long)),
        Just(Some(Style::Medium)),
        Just(Some(Style::Short)),
    ]
}

fn locale() -> impl Strategy<Value = Locale> {
    prop::sample::select(vec!["en_US", "en_GB", "de", "fr_FR", "ja_JP", "root", "sw_KE"])
        .prop_map(Locale::from)
}

proptest! {
    #[test]
    fn valid_codes_resolve_to_a_pattern(date in level(), time in level(), locale in locale()) {
        let result = StyleResolver::global().resolve(date, time, &locale, None);
        if date.is_none() && time.is_none() {
            prop_assert_eq!(result.unwrap_err(), StyleError::NoStyle);
        } else {
            let format = result.unwrap();
            prop_assert_eq!(format.kind(), FormatterKind::Pattern);
            prop_assert!(!format.pattern().is_empty());
        }
    }

    #[test]
    fn relative_codes_never_fail(date in 0..=i32::MAX, time in any::<i32>()) {
        let date = StyleCode::new(date) | StyleCode::RELATIVE;
        let format = DateFormat::date_time_instance(date, StyleCode::new(time), &Locale::from("en"));
        prop_assert_eq!(format.unwrap().kind(), FormatterKind::Relative);
    }

    #[test]
    fn out_of_range_codes_are_rejected(code in 4..128_i32) {
        let err = DateFormat::date_instance(StyleCode::new(code), &Locale::from("en")).unwrap_err();
        let is_illegal = matches!(err, StyleError::IllegalStyle { value, .. } if value == code);
        prop_assert!(is_illegal);
    }

    #[test]
    fn field_ids_match_pattern_letters(id in 0..34_i32) {
        let field = DateField::try_from(id).unwrap();
        let index = usize::try_from(id).unwrap();
        prop_assert_eq!(PATTERN_CHARS.chars().nth(index), Some(field.pattern_char()));
        prop_assert_eq!(DateField::from_pattern_char(field.pattern_char()), Some(field));
        prop_assert!(index < FIELD_COUNT);
    }

    #[test]
    fn short_dates_round_trip(days in 0..40_000_i64) {
        let mut format = DateFormat::date_instance(Style::Medium, &Locale::from("en_US")).unwrap();
        let time = Timestamp::from_millis(days * 86_400_000);
        let text = format.format_date(time);
        prop_assert_eq!(format.parse(&text).unwrap(), time);
    }
}
