//! Teams and set results are persisted as compact binary blobs (spec.md §6,
//! "Binary encodings") rather than JSON. We use MessagePack via `rmp-serde`,
//! the same encoding the teacher uses for its on-disk Chron page cache
//! (`src/chron.rs`).

use crate::error::StoreError;
use club_provider::{SetResult, Team};

pub fn encode_teams(teams: &[Team]) -> Vec<u8> {
    rmp_serde::to_vec(teams).expect("Team is always serializable")
}

pub fn decode_teams(match_id: &str, bytes: &[u8]) -> Result<Vec<Team>, StoreError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    rmp_serde::from_slice(bytes).map_err(|source| StoreError::CorruptBlob {
        match_id: match_id.to_string(),
        source,
    })
}

pub fn encode_results(results: &[SetResult]) -> Vec<u8> {
    rmp_serde::to_vec(results).expect("SetResult is always serializable")
}

pub fn decode_results(match_id: &str, bytes: &[u8]) -> Result<Vec<SetResult>, StoreError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    rmp_serde::from_slice(bytes).map_err(|source| StoreError::CorruptBlob {
        match_id: match_id.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_provider::TeamResult;

    #[test]
    fn teams_round_trip() {
        let teams = vec![
            Team {
                team_id: "t1".into(),
                players: vec![club_provider::Player {
                    player_id: "p1".into(),
                    name: "Alice".into(),
                    level: 3.5,
                    paid: Some(true),
                }],
                result: TeamResult::Won,
            },
            Team {
                team_id: "t2".into(),
                players: vec![],
                result: TeamResult::Lost,
            },
        ];

        let encoded = encode_teams(&teams);
        let decoded = decode_teams("m1", &encoded).unwrap();
        assert_eq!(decoded, teams);
    }

    #[test]
    fn results_round_trip() {
        let results = vec![SetResult {
            name: "Set 1".into(),
            scores: vec![("t1".into(), 6), ("t2".into(), 4)],
        }];

        let encoded = encode_results(&results);
        let decoded = decode_results("m1", &encoded).unwrap();
        assert_eq!(decoded, results);
    }

    #[test]
    fn empty_blob_decodes_to_empty_vec() {
        assert_eq!(decode_teams("m1", &[]).unwrap(), Vec::<Team>::new());
        assert_eq!(decode_results("m1", &[]).unwrap(), Vec::<SetResult>::new());
    }
}
