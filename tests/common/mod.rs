//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rs_autoscrape::{Candidate, FieldType};

/// `<ul>` of `n` items, each with a title span and a detail link.
pub fn simple_list(n: usize, badge: bool) -> String {
    let badge = if badge {
        r#"<span class="badge">NEW</span>"#
    } else {
        ""
    };
    let items: String = (1..=n)
        .map(|i| {
            format!(
                r#"
        <li class="item"><span class="title">Event {i}</span><a href="/e/{i}">link</a>{badge}</li>"#
            )
        })
        .collect();
    format!(
        r#"<html><head><title>Events</title></head><body>
    <ul>{items}
    </ul>
</body></html>"#
    )
}

/// Four days with three events each, nested two levels deep.
pub fn schedule() -> String {
    let mut days = String::new();
    for d in 1..=4 {
        let mut events = String::new();
        for e in 1..=3 {
            events.push_str(&format!(
                r#"
                <li class="event"><div class="info"><a class="link" href="/e/{d}-{e}">Event {d}-{e}</a></div><div class="meta"><span class="time">1{e}:0{d}</span></div></li>"#
            ));
        }
        days.push_str(&format!(
            r#"
        <div class="day"><div class="header"><h2 class="day-title">Day {d}</h2></div><ul class="events">{events}
            </ul></div>"#
        ));
    }
    format!(
        r#"<html><body>
    <h1>Schedule</h1>
    <div class="days">{days}
    </div>
</body></html>"#
    )
}

/// Name of the first field of `field_type` in a candidate's config.
pub fn field_name(candidate: &Candidate, field_type: FieldType) -> String {
    candidate
        .config
        .fields
        .iter()
        .find(|f| f.field_type == field_type)
        .map(|f| f.name.clone())
        .expect("field of requested type")
}

/// All values of `field` across a candidate's items, in item order.
pub fn values(candidate: &Candidate, field: &str) -> Vec<String> {
    candidate
        .items
        .iter()
        .filter_map(|item| item.get(field).cloned())
        .collect()
}
