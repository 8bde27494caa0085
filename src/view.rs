use serde::ser::{Serialize, Serializer};

use crate::CellValue;

/// One cell as transmitted to the client while a game is active.
///
/// Hidden cells serialize as `null` and flags as `"F"`, so the masked board
/// never leaks mine positions; only revealed cells expose their value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(CellValue),
}

impl Serialize for CellView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Hidden => serializer.serialize_none(),
            Self::Flagged => serializer.serialize_str("F"),
            Self::Revealed(value) => serializer.serialize_i8(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_form_is_null_flag_or_number() {
        let row = vec![CellView::Hidden, CellView::Flagged, CellView::Revealed(3)];
        assert_eq!(serde_json::to_value(&row).unwrap(), json!([null, "F", 3]));
    }
}
