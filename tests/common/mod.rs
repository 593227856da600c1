#![allow(dead_code)]

/// Login, terminal ID 01 23 45 67 89 01 23 45.
pub const LOGIN: &str = "78780D01012345678901234500018CDD0D0A";
/// Login, terminal ID 01 02 03 04 05 06 07 08.
pub const LOGIN_0102: &str = "78780D01010203040506070800018CDD0D0A";
/// Same login as `LOGIN_0102` behind the extended (`0x79 0x79`) marker.
pub const LOGIN_EXTENDED: &str = "7979000D01010203040506070800018CDD0D0A";
/// Location with trailing LBS data, fixed, north, west, course 143.
pub const LOCATION_WITH_LBS: &str =
    "78781F120B081D112E10CC027AC7EB0C46584900148F01CC00287D001FB8000380810D0A";
/// Location 2024-10-15 12:30:45, fixed, south, west, 60 km/h, course 300.
pub const LOCATION_SOUTH_WEST: &str = "78781712180A0F0C1E2DC50286D5740500D2643C112C0002ABCD0D0A";
/// Same position without fix, north, east.
pub const LOCATION_NORTH_EAST: &str = "78781712180A0F0C1E2DC50286D5740500D2643C0D2C0002ABCD0D0A";
/// Location with 16 info bytes: no course/status word.
pub const LOCATION_NO_STATUS: &str = "78781512180A0F0C1E2DC50286D5740500D2643C0002ABCD0D0A";
/// Location whose raw latitude is 0xFFFFFFFF.
pub const LOCATION_BAD_LATITUDE: &str =
    "78781712180A0F0C1E2DC5FFFFFFFF0500D2643C0D2C0002ABCD0D0A";
/// Heartbeat, ACC on, voltage level 4.
pub const HEARTBEAT: &str = "78780A1346040400020010ABCD0D0A";
/// Heartbeat, ACC off, voltage level 9.
pub const HEARTBEAT_UNKNOWN_VOLTAGE: &str = "78780A1344090400020011ABCD0D0A";
/// Well-formed frame with protocol number 0x8A.
pub const UNSUPPORTED_PROTOCOL: &str = "78780A8A46040400020010ABCD0D0A";
