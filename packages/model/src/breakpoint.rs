use serde::{Deserialize, Serialize};

/// A viewport-width tier. Breakpoints cascade widest to narrowest, like
/// desktop-first media queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub id: String,
    pub min_width: u32,
}

impl Breakpoint {
    pub fn new(id: impl Into<String>, min_width: u32) -> Self {
        Self {
            id: id.into(),
            min_width,
        }
    }
}

/// Ordered breakpoint tiers, widest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Breakpoint>", into = "Vec<Breakpoint>")]
pub struct Breakpoints(Vec<Breakpoint>);

impl From<Vec<Breakpoint>> for Breakpoints {
    fn from(tiers: Vec<Breakpoint>) -> Self {
        Self::new(tiers)
    }
}

impl From<Breakpoints> for Vec<Breakpoint> {
    fn from(breakpoints: Breakpoints) -> Self {
        breakpoints.0
    }
}

impl Breakpoints {
    /// Build a breakpoint set. Tiers are sorted widest first.
    pub fn new(mut tiers: Vec<Breakpoint>) -> Self {
        tiers.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        Self(tiers)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Breakpoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Breakpoint> {
        self.0.iter().find(|bp| bp.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|bp| bp.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|bp| bp.id.as_str())
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self(vec![
            Breakpoint::new("xl", 1280),
            Breakpoint::new("lg", 1024),
            Breakpoint::new("md", 768),
            Breakpoint::new("sm", 640),
            Breakpoint::new("xs", 0),
        ])
    }
}

impl<'a> IntoIterator for &'a Breakpoints {
    type Item = &'a Breakpoint;
    type IntoIter = std::slice::Iter<'a, Breakpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_widest_first() {
        let bps = Breakpoints::default();
        let ids: Vec<&str> = bps.ids().collect();
        assert_eq!(ids, vec!["xl", "lg", "md", "sm", "xs"]);
    }

    #[test]
    fn test_new_sorts_widest_first() {
        let bps = Breakpoints::new(vec![
            Breakpoint::new("mobile", 0),
            Breakpoint::new("desktop", 1200),
            Breakpoint::new("tablet", 768),
        ]);
        let ids: Vec<&str> = bps.ids().collect();
        assert_eq!(ids, vec!["desktop", "tablet", "mobile"]);
        assert_eq!(bps.position("mobile"), Some(2));
    }

    #[test]
    fn test_deserialize_from_config_shape() {
        let bps: Breakpoints =
            serde_json::from_str(r#"[{"id":"xs","minWidth":0},{"id":"xl","minWidth":1280}]"#).unwrap();
        assert_eq!(bps.get("xl").map(|bp| bp.min_width), Some(1280));
        assert_eq!(bps.position("xl"), Some(0));
    }
}
