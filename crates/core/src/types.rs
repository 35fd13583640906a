/// Backend primary keys (Laravel auto-increment ids).
pub type DbId = i64;

/// Calendar dates travel as `YYYY-MM-DD` strings.
pub type IsoDate = String;
