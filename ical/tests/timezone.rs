// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for resolving UTC offsets from embedded VTIMEZONEs.

use icalcodec::tz::{OffsetTimeline, TimezoneDefinition};
use icalcodec::{
    Component, ResolutionSource, ResolveError, ResolverOptions, TzResolver, parse_calendar_str,
    parse_str,
};
use jiff::Timestamp;
use jiff::civil::datetime;

const NEW_YORK: &str = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//Example Corp.//icalcodec//EN\r
BEGIN:VTIMEZONE\r
TZID:America/New_York\r
LAST-MODIFIED:20050809T050000Z\r
BEGIN:STANDARD\r
DTSTART:20071104T020000\r
RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU\r
TZOFFSETFROM:-0400\r
TZOFFSETTO:-0500\r
TZNAME:EST\r
END:STANDARD\r
BEGIN:DAYLIGHT\r
DTSTART:20070311T020000\r
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r
TZOFFSETFROM:-0500\r
TZOFFSETTO:-0400\r
TZNAME:EDT\r
END:DAYLIGHT\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
UID:ny-1@example.com\r
DTSTART;TZID=America/New_York:20210701T090000\r
DTEND;TZID=America/New_York:20210701T100000\r
SUMMARY:Summer standup\r
END:VEVENT\r
END:VCALENDAR\r
";

// Blank lines, bare LF and a lower-case parameter name, as found in the wild
const TAIPEI: &str = "
BEGIN:VCALENDAR
PRODID:-//Google Inc//Google Calendar 70.9054//EN
VERSION:2.0
CALSCALE:GREGORIAN
METHOD:REQUEST

BEGIN:VTIMEZONE
TZID:Taipei Standard Time
TZURL:http://timezones.example.org/tz/America-Los_Angeles.ics

BEGIN:STANDARD
DTSTART:16010101T000000
TZOFFSETFROM:+0800
TZOFFSETTO:+0800
RRULE:FREQ=YEARLY;BYMONTH=4;BYDAY=-1SU;UNTIL=19730429T070000Z
TZNAME:EDT
END:STANDARD

BEGIN:DAYLIGHT
DTSTART:16010101T000000
TZOFFSETFROM:+0800
TZOFFSETTO:+0800
RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU;UNTIL=20061029T060000Z
TZNAME:EST
END:DAYLIGHT

END:VTIMEZONE

BEGIN:VEVENT
DTSTART;tzid=Taipei Standard Time:20211112T000000
DTEND;TZID=Taipei Standard Time:20211112T010000
ORGANIZER;CN=bonnie@edison.tech:mailto:bonnie@edison.tech
UID:69b37lqafm98nr7jvu56f8utv8@google.com
ATTENDEE;CUTYPE=INDIVIDUAL;ROLE=REQ-PARTICIPANT;PARTSTAT=ACCEPTED;RSVP=TRUE
 ;CN=myan@yipitdata.com;X-NUM-GUESTS=0:mailto:myan@yipitdata.com
LOCATION:Zoom info in details // link for English and Tencent link for simu
 ltaneous Chinese translation.( Audio only)
SUMMARY:Vin x Edison China Team town hall
END:VEVENT

END:VCALENDAR
";

fn embedded_only(calendar: &Component) -> TzResolver {
    let mut resolver = TzResolver::new(ResolverOptions::default().system_fallback(false));
    let errors = resolver.register(calendar);
    assert!(errors.is_empty(), "{errors:?}");
    resolver
}

fn event(calendar: &Component) -> &Component {
    calendar.children_named("VEVENT").next().unwrap()
}

#[test]
fn resolves_daylight_and_standard_from_yearly_rules() {
    let calendar = parse_calendar_str(NEW_YORK).unwrap();
    let resolver = embedded_only(&calendar);

    let summer = resolver
        .resolve("America/New_York", datetime(2021, 7, 1, 9, 0, 0, 0))
        .unwrap();
    assert_eq!(summer.offset.seconds(), -4 * 3600);
    assert_eq!(summer.name.as_deref(), Some("EDT"));
    assert_eq!(summer.source, ResolutionSource::Embedded);

    let winter = resolver
        .resolve("America/New_York", datetime(2021, 1, 15, 9, 0, 0, 0))
        .unwrap();
    assert_eq!(winter.offset.seconds(), -5 * 3600);
    assert_eq!(winter.name.as_deref(), Some("EST"));

    // the days after each 2021 onset
    let after_spring = resolver
        .resolve("America/New_York", datetime(2021, 3, 15, 0, 0, 0, 0))
        .unwrap();
    assert_eq!(after_spring.name.as_deref(), Some("EDT"));
    let after_fall = resolver
        .resolve("America/New_York", datetime(2021, 11, 8, 0, 0, 0, 0))
        .unwrap();
    assert_eq!(after_fall.name.as_deref(), Some("EST"));
}

#[test]
fn resolves_dtstart_to_utc_instant() {
    let calendar = parse_calendar_str(NEW_YORK).unwrap();
    let resolver = embedded_only(&calendar);

    let dtstart = event(&calendar).property("DTSTART").unwrap();
    let instant = resolver.resolve_property(dtstart).unwrap();
    assert_eq!(instant, "2021-07-01T13:00:00Z".parse::<Timestamp>().unwrap());
}

#[test]
fn resolves_lenient_real_world_input() {
    let parsed = parse_str(TAIPEI).unwrap();
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    let calendar = parsed.components.first().unwrap();
    let resolver = embedded_only(calendar);

    let definition = resolver.find("Taipei Standard Time").unwrap();
    assert_eq!(definition.observances.len(), 2);
    assert_eq!(
        definition.url.as_deref(),
        Some("http://timezones.example.org/tz/America-Los_Angeles.ics")
    );

    let resolution = resolver
        .resolve("Taipei Standard Time", datetime(2021, 11, 12, 0, 0, 0, 0))
        .unwrap();
    assert_eq!(resolution.offset.seconds(), 8 * 3600);

    let event = event(calendar);
    let start = resolver
        .resolve_property(event.property("DTSTART").unwrap())
        .unwrap();
    assert_eq!(start, "2021-11-11T16:00:00Z".parse::<Timestamp>().unwrap());
    let end = resolver
        .resolve_property(event.property("DTEND").unwrap())
        .unwrap();
    assert_eq!(end, "2021-11-11T17:00:00Z".parse::<Timestamp>().unwrap());

    assert_eq!(
        event.value("ATTENDEE"),
        Some("mailto:myan@yipitdata.com")
    );
    assert_eq!(
        event.value("LOCATION"),
        Some(
            "Zoom info in details // link for English and Tencent link for \
             simultaneous Chinese translation.( Audio only)"
        )
    );
}

#[test]
fn utc_and_floating_properties() {
    let calendar = parse_calendar_str(
        "BEGIN:VEVENT\r\n\
         DTSTAMP:19970901T130000Z\r\n\
         DTSTART:19970903T163000\r\n\
         DUE;VALUE=DATE:19970904\r\n\
         END:VEVENT\r\n",
    )
    .unwrap();
    let resolver = TzResolver::new(ResolverOptions::default().system_fallback(false));

    let stamp = resolver
        .resolve_property(calendar.property("DTSTAMP").unwrap())
        .unwrap();
    assert_eq!(stamp, "1997-09-01T13:00:00Z".parse::<Timestamp>().unwrap());

    assert!(matches!(
        resolver.resolve_property(calendar.property("DTSTART").unwrap()),
        Err(ResolveError::Floating { property }) if property == "DTSTART"
    ));
    assert!(matches!(
        resolver.resolve_property(calendar.property("DUE").unwrap()),
        Err(ResolveError::InvalidDateTime(_))
    ));
}

#[test]
fn unknown_timezone_without_fallback() {
    let calendar = parse_calendar_str(NEW_YORK).unwrap();
    let resolver = embedded_only(&calendar);
    let err = resolver
        .resolve("Mars/Olympus_Mons", datetime(2021, 7, 1, 9, 0, 0, 0))
        .unwrap_err();
    assert!(matches!(err, ResolveError::UnknownTimezone { tzid } if tzid == "Mars/Olympus_Mons"));
}

#[test]
fn rdate_observances_and_boundaries() {
    let calendar = parse_calendar_str(
        "BEGIN:VTIMEZONE\r\n\
         TZID:Example/Shifting\r\n\
         BEGIN:STANDARD\r\n\
         DTSTART:19700101T000000\r\n\
         TZOFFSETFROM:+0100\r\n\
         TZOFFSETTO:+0100\r\n\
         TZNAME:ST\r\n\
         RDATE:19901001T030000,19911001T030000\r\n\
         END:STANDARD\r\n\
         BEGIN:DAYLIGHT\r\n\
         DTSTART:19900401T020000\r\n\
         TZOFFSETFROM:+0100\r\n\
         TZOFFSETTO:+0200\r\n\
         TZNAME:DT\r\n\
         RDATE:19910401T020000\r\n\
         END:DAYLIGHT\r\n\
         END:VTIMEZONE\r\n",
    )
    .unwrap();
    let resolver = embedded_only(&calendar);
    let name_at = |y, m, d, h| {
        resolver
            .resolve("Example/Shifting", datetime(y, m, d, h, 0, 0, 0))
            .unwrap()
            .name
    };

    assert_eq!(name_at(1960, 1, 1, 0).as_deref(), Some("ST")); // before the first onset
    assert_eq!(name_at(1990, 4, 1, 1).as_deref(), Some("ST"));
    assert_eq!(name_at(1990, 4, 1, 2).as_deref(), Some("DT")); // exactly at the onset
    assert_eq!(name_at(1990, 10, 1, 3).as_deref(), Some("ST"));
    assert_eq!(name_at(1991, 6, 1, 0).as_deref(), Some("DT"));
    assert_eq!(name_at(2020, 6, 1, 0).as_deref(), Some("ST")); // no further onsets

    let definition = TimezoneDefinition::try_from(&calendar).unwrap();
    let timeline = OffsetTimeline::build(&definition, 2100).unwrap();
    assert_eq!(timeline.transitions().len(), 5);
}

#[test]
fn count_bounds_the_expansion() {
    let calendar = parse_calendar_str(
        "BEGIN:VTIMEZONE\r\n\
         TZID:Example/Counted\r\n\
         BEGIN:STANDARD\r\n\
         DTSTART:20001029T030000\r\n\
         RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU;COUNT=2\r\n\
         TZOFFSETFROM:+1000\r\n\
         TZOFFSETTO:+0900\r\n\
         TZNAME:ST\r\n\
         END:STANDARD\r\n\
         BEGIN:DAYLIGHT\r\n\
         DTSTART:20000326T020000\r\n\
         RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU\r\n\
         TZOFFSETFROM:+0900\r\n\
         TZOFFSETTO:+1000\r\n\
         TZNAME:DT\r\n\
         END:DAYLIGHT\r\n\
         END:VTIMEZONE\r\n",
    )
    .unwrap();
    let resolver = embedded_only(&calendar);
    let offset_at = |y, m, d| {
        resolver
            .resolve("Example/Counted", datetime(y, m, d, 12, 0, 0, 0))
            .unwrap()
            .offset
            .seconds()
            / 3600
    };

    assert_eq!(offset_at(2000, 12, 1), 9);
    assert_eq!(offset_at(2001, 12, 1), 9); // second and last standard onset
    assert_eq!(offset_at(2002, 12, 1), 10); // daylight never ends again
}

#[test]
fn unsupported_rule_skips_only_that_definition() {
    let calendar = parse_calendar_str(
        "BEGIN:VCALENDAR\r\n\
         BEGIN:VTIMEZONE\r\n\
         TZID:Example/Weekly\r\n\
         BEGIN:STANDARD\r\n\
         DTSTART:20000101T000000\r\n\
         RRULE:FREQ=WEEKLY\r\n\
         TZOFFSETTO:+0100\r\n\
         END:STANDARD\r\n\
         END:VTIMEZONE\r\n\
         BEGIN:VTIMEZONE\r\n\
         TZID:Example/Fixed\r\n\
         BEGIN:STANDARD\r\n\
         DTSTART:20000101T000000\r\n\
         TZOFFSETTO:+0300\r\n\
         END:STANDARD\r\n\
         END:VTIMEZONE\r\n\
         END:VCALENDAR\r\n",
    )
    .unwrap();
    let mut resolver = TzResolver::new(ResolverOptions::default().system_fallback(false));
    let errors = resolver.register(&calendar);
    assert_eq!(errors.len(), 1);

    assert!(resolver.find("Example/Weekly").is_err());
    let fixed = resolver
        .resolve("Example/Fixed", datetime(2020, 1, 1, 0, 0, 0, 0))
        .unwrap();
    assert_eq!(fixed.offset.seconds(), 3 * 3600);
}

#[test]
fn embedded_definition_shadows_host_database() {
    let calendar = parse_calendar_str(
        "BEGIN:VTIMEZONE\r\n\
         TZID:America/New_York\r\n\
         BEGIN:STANDARD\r\n\
         DTSTART:16010101T000000\r\n\
         TZOFFSETTO:+0500\r\n\
         TZNAME:ODD\r\n\
         END:STANDARD\r\n\
         END:VTIMEZONE\r\n",
    )
    .unwrap();
    let resolver = TzResolver::from_tree(&calendar);
    let resolution = resolver
        .resolve("America/New_York", datetime(2021, 7, 1, 9, 0, 0, 0))
        .unwrap();
    assert_eq!(resolution.source, ResolutionSource::Embedded);
    assert_eq!(resolution.offset.seconds(), 5 * 3600);
}

#[test]
fn falls_back_to_host_database() {
    // hosts without a timezone database cannot answer; nothing to check there
    if jiff::tz::TimeZone::get("Europe/Berlin").is_err() {
        return;
    }

    let resolver = TzResolver::default();
    let resolution = resolver
        .resolve("Europe/Berlin", datetime(2021, 7, 1, 12, 0, 0, 0))
        .unwrap();
    assert_eq!(resolution.source, ResolutionSource::System);
    assert_eq!(resolution.offset.seconds(), 2 * 3600);
    assert_eq!(resolution.name.as_deref(), Some("CEST"));
}
