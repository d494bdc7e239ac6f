use serde::{Deserialize, Serialize};

/// Logical grid content plus the generation counter, detached from the
/// engine so a collaborator can serialize, ship, or diff simulation state.
/// Cells are row-major, `width * height` long; the sentinel border is an
/// engine detail and never leaves the crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<C> {
    pub width: usize,
    pub height: usize,
    pub generation: u64,
    pub cells: Vec<C>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_serialize_as_plain_json() {
        let snapshot = Snapshot {
            width: 2,
            height: 1,
            generation: 7,
            cells: vec![0u8, 1],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"width":2,"height":1,"generation":7,"cells":[0,1]}"#
        );
        let back: Snapshot<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
