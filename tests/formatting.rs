use datefmt::{
    BooleanAttribute, CalendarField, DateField, DateFormat, Error, FieldError, FieldPosition,
    FieldRegistry, FormatArg, FormatError, FormatterKind, Locale, LocaleKind, ParseError,
    ParsePosition, RelativeFormat, Style, StyleCode, StyleError, StyleKind, TimeZone, Timestamp,
    field,
};

/// 2024-03-15T13:45:30.250Z, a Friday
const FRIDAY: i64 = 1_710_510_330_250;
const HOUR: i32 = 3_600_000;

fn en_us() -> Locale {
    Locale::from("en_US")
}

#[test]
fn test_field_ids_map_to_attributes() {
    field::init();
    let registry = FieldRegistry::global().unwrap();

    for id in 0..34 {
        let date_field = DateField::try_from(id).unwrap();
        assert_eq!(date_field.id(), id);
        assert_eq!(date_field.attribute().resolve().unwrap(), date_field.attribute());
    }
    assert_eq!(DateField::try_from(-1), Err(FieldError::InvalidFieldId(-1)));
    assert_eq!(DateField::try_from(34), Err(FieldError::InvalidFieldId(34)));

    let month = registry.by_calendar_field(CalendarField::Month.id()).unwrap().unwrap();
    assert!(std::ptr::eq(month, &field::MONTH));
    assert_eq!(registry.by_calendar_field(23), Err(FieldError::OutOfRange(23)));
    assert!(registry.by_name("no such field").is_err());
}

#[test]
fn test_style_validation_at_the_boundary() {
    let err = DateFormat::date_instance(StyleCode::new(4), &en_us()).unwrap_err();
    assert_eq!(err, StyleError::IllegalStyle {
        kind:  StyleKind::Date,
        value: 4,
    });
    let err = DateFormat::time_instance(StyleCode::new(7), &en_us()).unwrap_err();
    assert_eq!(err.to_string(), "Illegal time style: 7");
    assert_eq!(
        DateFormat::date_time_instance(StyleCode::NONE, StyleCode::NONE, &en_us()).unwrap_err(),
        StyleError::NoStyle
    );
}

#[test]
fn test_relative_request() {
    let format =
        DateFormat::date_time_instance(Style::Full | StyleCode::RELATIVE, StyleCode::NONE, &en_us())
            .unwrap();
    assert_eq!(format.kind(), FormatterKind::Relative);
    let relative = format.downcast_strategy::<RelativeFormat>().unwrap();
    assert_eq!(relative.date_style(), Some(Style::Full));
    assert_eq!(relative.time_style(), None);
}

#[test]
fn test_full_round_trip() {
    let mut format = DateFormat::date_time_instance(Style::Full, Style::Full, &en_us()).unwrap();
    format.set_time_zone(TimeZone::from_offset(-5 * HOUR));

    let text = format.format_date(Timestamp::from_millis(FRIDAY));
    assert_eq!(text, "Friday, March 15, 2024 at 8:45:30 AM GMT-05:00");

    format.set_time_zone(TimeZone::utc());
    let parsed = format.parse(&text).unwrap();
    assert_eq!(parsed.millis(), FRIDAY - 250);
    assert_eq!(format.time_zone(), &TimeZone::utc());
}

#[test]
fn test_field_position_reports_first_occurrence() {
    let mut format = DateFormat::date_instance(Style::Long, &en_us()).unwrap();
    let mut pos = FieldPosition::new(DateField::Date);
    let text = format.format(FormatArg::from(FRIDAY), Some(&mut pos)).unwrap();
    assert_eq!(text, "March 15, 2024");
    assert_eq!((pos.begin(), pos.end()), (6, 8));

    let mut pos = FieldPosition::for_attribute(&field::YEAR);
    format.format(Timestamp::from_millis(FRIDAY).into(), Some(&mut pos)).unwrap();
    assert_eq!(&text[pos.begin()..pos.end()], "2024");
}

#[test]
fn test_unsupported_inputs() {
    let mut format = DateFormat::default_instance().unwrap();
    assert_eq!(
        format.format(FormatArg::from("March"), None),
        Err(FormatError::UnsupportedInput("String"))
    );
    assert!(format.format(FormatArg::from(true), None).is_err());
    assert!(format.format(FormatArg::from(f64::NAN), None).is_err());
    assert!(format.format(FormatArg::from(1.5e12), None).is_ok());
}

#[test]
fn test_parse_failures() {
    let mut format = DateFormat::date_instance(Style::Short, &en_us()).unwrap();
    assert!(matches!(format.parse(""), Err(ParseError::Unparseable { error_index: 0, .. })));

    let mut pos = ParsePosition::new(0);
    assert_eq!(format.parse_at("3/x/24", &mut pos), None);
    assert_eq!(pos.index(), 0);
    assert_eq!(pos.error_index(), Some(2));
}

#[test]
fn test_strict_calendar_rejects_out_of_range() {
    let mut format = DateFormat::date_instance(Style::Short, &en_us()).unwrap();
    format.set_lenient(false);
    let mut pos = ParsePosition::new(0);
    assert_eq!(format.parse_at("13/40/24", &mut pos), None);
    assert_eq!(pos.index(), 0);
    assert_eq!(pos.error_index(), Some(0));

    format.set_lenient(true);
    let mut pos = ParsePosition::new(0);
    assert!(format.parse_at("13/40/24", &mut pos).is_some());
    assert_eq!(pos.index(), 8);
}

#[test]
fn test_clones_are_independent() {
    let format = DateFormat::time_instance(Style::Short, &en_us()).unwrap();
    let mut copy = format.clone();
    assert_eq!(copy, format);

    copy.set_time_zone(TimeZone::from_offset(HOUR));
    assert_eq!(format.time_zone(), &TimeZone::utc());
    assert_ne!(copy, format);
}

#[test]
fn test_boolean_attributes() {
    let mut format = DateFormat::date_instance(Style::Medium, &en_us()).unwrap();
    assert!(format.boolean_attribute(BooleanAttribute::ParseAllowNumeric));
    assert!(format.parse("3 15, 2024").is_ok());

    format
        .set_boolean_attribute(BooleanAttribute::ParseAllowNumeric, false)
        .set_boolean_attribute(BooleanAttribute::ParsePartialMatch, false);
    assert!(!format.boolean_attribute(BooleanAttribute::ParseAllowNumeric));
    assert!(format.boolean_attribute(BooleanAttribute::ParseAllowWhitespace));
    assert!(format.parse("3 15, 2024").is_err());
    assert!(format.parse("Mar 15, 2024").is_ok());
}

#[test]
fn test_locale_provenance() {
    let format = DateFormat::date_instance(Style::Short, &Locale::from("de_AT")).unwrap();
    assert_eq!(format.locale(LocaleKind::Valid), Some(&Locale::from("de_AT")));
    assert_eq!(format.locale(LocaleKind::Actual), Some(&Locale::from("de")));
    assert_eq!(format.pattern(), "dd.MM.yy");
}

#[test]
fn test_buddhist_locale() {
    let mut format = DateFormat::date_instance(Style::Long, &Locale::from("en_TH")).unwrap();
    assert_eq!(format.calendar().calendar_type(), "buddhist");
    assert_eq!(format.format_date(Timestamp::from_millis(FRIDAY)), "March 15, 2567 BE");
}

#[test]
fn test_skeleton_instance() {
    let mut format =
        DateFormat::instance_for_skeleton(&datefmt::skeleton::YEAR_ABBR_MONTH_WEEKDAY_DAY.into(), &en_us())
            .unwrap();
    assert_eq!(format.format_date(Timestamp::from_millis(FRIDAY)), "Fri, Mar 15, 2024");

    let err = DateFormat::instance_for_skeleton(&"yMb".into(), &en_us()).unwrap_err();
    assert!(matches!(err, Error::Pattern(_)));
}

#[test]
fn test_extreme_years_fail_to_parse() {
    let mut buddhist = DateFormat::from_pattern("y", &Locale::from("th_TH")).unwrap();
    assert!(buddhist.parse("-2147483648").is_err());

    let mut gregorian = DateFormat::from_pattern("G y", &en_us()).unwrap();
    assert!(gregorian.parse("BC -2147483648").is_err());
    gregorian.set_lenient(false);
    assert!(gregorian.parse("BC -2147483648").is_err());
}

#[test]
fn test_partial_month_name() {
    let mut format = DateFormat::from_pattern("MMMM d, y", &en_us()).unwrap();
    let parsed = format.parse("Septem 5, 2024").unwrap();
    assert_eq!(parsed.millis(), 1_725_494_400_000);

    format.set_boolean_attribute(BooleanAttribute::ParsePartialMatch, false);
    assert!(format.parse("Septem 5, 2024").is_err());
}
