//! Ordering of `major.minor.patch` version identifiers.
//!
//! Registry keys are opaque strings; this module is the only place that
//! interprets them as integer triples. Bounds may be partial (`9`, `9.5`,
//! `9.5.3`) and only constrain the components they spell out.

use crate::error::AvmError;
use crate::registry::VersionId;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const MAX_COMPONENTS: usize = 3;

/// A version identifier interpreted as an integer triple.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VersionTriple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Upper bound for [`latest`]: one to three leading components.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VersionBound {
    components: Vec<u64>,
}

impl VersionTriple {
    fn components(&self) -> [u64; MAX_COMPONENTS] {
        [self.major, self.minor, self.patch]
    }
}

impl FromStr for VersionTriple {
    type Err = AvmError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let components = parse_components(raw)?;
        match components.as_slice() {
            [major, minor, patch] => Ok(Self {
                major: *major,
                minor: *minor,
                patch: *patch,
            }),
            _ => Err(AvmError::InvalidArgument(format!(
                "'{raw}' is not a major.minor.patch version"
            ))),
        }
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl VersionBound {
    /// Whether `version` orders strictly below the bound on the components
    /// the bound specifies. `9.5` admits `9.4.9` and `8.0.0` but not `9.5.0`.
    pub fn admits(&self, version: &VersionTriple) -> bool {
        let width = self.components.len();
        version.components()[..width] < self.components[..]
    }
}

impl FromStr for VersionBound {
    type Err = AvmError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let components = parse_components(raw)?;
        Ok(Self { components })
    }
}

impl fmt::Display for VersionBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

fn parse_components(raw: &str) -> Result<Vec<u64>, AvmError> {
    let segments: Vec<&str> = raw.trim().split('.').collect();
    if segments.len() > MAX_COMPONENTS {
        return Err(AvmError::InvalidArgument(format!(
            "'{raw}' has {} components; at most {MAX_COMPONENTS} are allowed",
            segments.len()
        )));
    }
    segments
        .iter()
        .map(|segment| {
            segment.parse::<u64>().map_err(|_| {
                AvmError::InvalidArgument(format!(
                    "'{raw}' contains non-numeric component '{segment}'"
                ))
            })
        })
        .collect()
}

/// Compare two registry version identifiers as integer triples.
pub fn compare(a: &str, b: &str) -> Result<Ordering, AvmError> {
    let a: VersionTriple = a.parse()?;
    let b: VersionTriple = b.parse()?;
    Ok(a.cmp(&b))
}

/// Pick the greatest version of `app` admitted by `below`.
///
/// Every identifier is parsed, so a registry key that is not a triple fails
/// with `InvalidVersion` rather than being skipped. Among equal triples the
/// one seen last wins.
pub fn latest<'a, I>(
    app: &str,
    versions: I,
    below: Option<&VersionBound>,
) -> Result<VersionId, AvmError>
where
    I: IntoIterator<Item = &'a VersionId>,
{
    let mut best: Option<(VersionTriple, &VersionId)> = None;
    for id in versions {
        let triple: VersionTriple = id.as_str().parse().map_err(|_| AvmError::InvalidVersion {
            app: app.to_string(),
            version: id.to_string(),
        })?;
        if let Some(bound) = below {
            if !bound.admits(&triple) {
                continue;
            }
        }
        match best {
            Some((current, _)) if triple < current => {}
            _ => best = Some((triple, id)),
        }
    }

    best.map(|(_, id)| id.clone()).ok_or_else(|| AvmError::NoMatch {
        app: app.to_string(),
        below: below.map(ToString::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ids(raw: &[&str]) -> Vec<VersionId> {
        raw.iter().map(|v| VersionId::new(v)).collect()
    }

    fn wadam() -> Vec<VersionId> {
        ids(&["9.5.3", "9.5.1", "9.2.4", "9.5.2", "9.4.1", "9.4.9"])
    }

    fn bound(raw: &str) -> VersionBound {
        raw.parse().expect("valid bound")
    }

    #[test]
    fn latest_without_bound_is_the_maximum() {
        let newest = latest("wadam", &wadam(), None).unwrap();
        assert_eq!(newest.as_str(), "9.5.3");
    }

    #[test]
    fn latest_respects_full_and_partial_bounds() {
        let versions = wadam();
        assert_eq!(
            latest("wadam", &versions, Some(&bound("9.5.3"))).unwrap().as_str(),
            "9.5.2"
        );
        assert_eq!(
            latest("wadam", &versions, Some(&bound("9.5"))).unwrap().as_str(),
            "9.4.9"
        );
        assert_eq!(
            latest("wadam", &versions, Some(&bound("10"))).unwrap().as_str(),
            "9.5.3"
        );
    }

    #[test]
    fn integer_ordering_beats_string_ordering() {
        let versions = ids(&["10.0.0", "9.10.2", "9.9.9"]);
        assert_eq!(latest("x", &versions, None).unwrap().as_str(), "10.0.0");
        assert_eq!(
            latest("x", &versions, Some(&bound("10"))).unwrap().as_str(),
            "9.10.2"
        );
    }

    #[test]
    fn nothing_below_the_bound_is_no_match() {
        let err = latest("wadam", &wadam(), Some(&bound("9"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatch);

        let err = latest("empty", &Vec::<VersionId>::new(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatch);
    }

    #[test]
    fn bounds_with_wrong_shape_are_invalid_arguments() {
        for raw in ["10.5.10.5", "", "9.x", "9..1", "-1"] {
            let err = raw.parse::<VersionBound>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "bound {raw:?}");
        }
    }

    #[test]
    fn non_triple_registry_keys_fail_ordering() {
        let versions = ids(&["9.5.3", "9.6-beta"]);
        let err = latest("wadam", &versions, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidVersion);
    }

    #[test]
    fn compare_orders_triples_numerically() {
        assert_eq!(compare("9.10.0", "9.9.9").unwrap(), Ordering::Greater);
        assert_eq!(compare("1.2.3", "1.2.3").unwrap(), Ordering::Equal);
        assert_eq!(compare("1.2", "1.2.3").unwrap_err().kind(), ErrorKind::InvalidArgument);
    }
}
