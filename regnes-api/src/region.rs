use serde::{Deserialize, Serialize};

/// A sub-national region as listed by `/trends/regions`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Backend region identifier (ROR code)
    pub region_id: i64,
    /// Human-readable name of the region
    pub region_name: String,
}

impl Region {
    /// Resolve a CLI-style region argument: a numeric id is taken as-is,
    /// anything else is matched case-insensitively against region names.
    pub fn resolve(arg: &str, regions: &[Region]) -> Option<i64> {
        let arg = arg.trim();
        let wanted = arg.to_lowercase();
        if let Ok(id) = arg.parse::<i64>() {
            return Some(id);
        }
        regions
            .iter()
            .find(|r| r.region_name.to_lowercase() == wanted)
            .map(|r| r.region_id)
    }
}

#[cfg(test)]
mod tests {
    use super::Region;

    #[test]
    fn test_parse_regions() {
        let json = r#"[
            {"region_id": 101, "region_name": "Schleswig-Holstein Mitte"},
            {"region_id": 102, "region_name": "Schleswig-Holstein Nord"}
        ]"#;
        let regions: Vec<Region> = serde_json::from_str(json).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].region_id, 101);
        assert_eq!(regions[1].region_name, "Schleswig-Holstein Nord");
    }

    #[test]
    fn test_resolve() {
        let regions = vec![Region {
            region_id: 7,
            region_name: "Oberland".to_string(),
        }];
        assert_eq!(Region::resolve("7", &regions), Some(7));
        assert_eq!(Region::resolve("42", &regions), Some(42));
        assert_eq!(Region::resolve(" oberland ", &regions), Some(7));
        assert_eq!(Region::resolve("Unterland", &regions), None);
    }

    #[test]
    fn test_resolve_non_ascii_names() {
        let regions = vec![
            Region {
                region_id: 512,
                region_name: "Östliches Ruhrgebiet".to_string(),
            },
            Region {
                region_id: 901,
                region_name: "Ärmelkanal Süd".to_string(),
            },
        ];
        assert_eq!(Region::resolve("östliches ruhrgebiet", &regions), Some(512));
        assert_eq!(Region::resolve("ÄRMELKANAL SÜD", &regions), Some(901));
        assert_eq!(Region::resolve("westliches ruhrgebiet", &regions), None);
    }
}
