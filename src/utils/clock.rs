use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Re-anchors a stored time-of-day onto a calendar date.
///
/// `asistencia.hora` is a TIME column: a duration since midnight with no
/// date attached. Comparing it against a wall-clock instant requires
/// pinning it to the date the event belongs to, not to whatever date the
/// database server considers current.
pub fn anchor_to_date(fecha: NaiveDate, hora: NaiveTime) -> NaiveDateTime {
    fecha.and_time(hora)
}
