//! Representative IANA zone names per UTC offset, for display labels only.

use cronscope_core::TimeZoneOffset;

/// Returned when an offset has no entry in [`ZONES_BY_OFFSET`].
pub const UNKNOWN_ZONE: &str = "Unknown";

/// Offset in minutes → example zones.
pub static ZONES_BY_OFFSET: &[(i32, &[&str])] = &[
    (-720, &["Etc/GMT+12"]),
    (-660, &["Pacific/Pago_Pago", "Pacific/Niue"]),
    (-600, &["Pacific/Honolulu"]),
    (-540, &["America/Anchorage"]),
    (-480, &["America/Los_Angeles"]),
    (-420, &["America/Denver", "America/Phoenix"]),
    (-360, &["America/Chicago"]),
    (-300, &["America/New_York"]),
    (-240, &["America/Caracas", "America/Halifax"]),
    (-180, &["America/Sao_Paulo"]),
    (-120, &["Atlantic/South_Georgia"]),
    (-60, &["Atlantic/Azores"]),
    (0, &["UTC", "Europe/London"]),
    (60, &["Europe/Berlin", "Europe/Paris"]),
    (120, &["Europe/Kiev", "Europe/Istanbul"]),
    (180, &["Europe/Moscow", "Africa/Nairobi"]),
    (210, &["Asia/Tehran"]),
    (240, &["Asia/Dubai"]),
    (270, &["Asia/Kabul"]),
    (300, &["Asia/Karachi"]),
    (330, &["Asia/Kolkata"]),
    (360, &["Asia/Dhaka"]),
    (420, &["Asia/Bangkok"]),
    (480, &["Asia/Shanghai", "Asia/Singapore"]),
    (540, &["Asia/Tokyo"]),
    (570, &["Australia/Darwin"]),
    (600, &["Australia/Sydney"]),
    (660, &["Pacific/Noumea"]),
    (720, &["Pacific/Auckland"]),
];

/// Example zone names for `offset`, or `["Unknown"]`.
pub fn time_zones_by_offset(offset: TimeZoneOffset) -> Vec<&'static str> {
    ZONES_BY_OFFSET
        .iter()
        .find(|(minutes, _)| *minutes == offset.minutes())
        .map(|(_, zones)| zones.to_vec())
        .unwrap_or_else(|| vec![UNKNOWN_ZONE])
}
