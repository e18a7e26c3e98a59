use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

/// Minimum length of an abbreviated object ID
const MIN_ABBREV_LENGTH: usize = 4;

/// Represents a revision specification that identifies the commit a walk starts at.
///
/// Supports multiple formats:
/// - Ref names: `main`, `feature/new-feature`, `HEAD`, `refs/tags/v1`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full OIDs: 40-character hexadecimal strings (resolved as fallback if ref doesn't exist)
/// - Abbreviated OIDs: 4-40 character hexadecimal strings (resolved as fallback if ref doesn't exist)
/// - Parent notation: `<revision>^` (first parent)
/// - Ancestor notation: `<revision>~<n>` (n-th first-parent ancestor)
///
/// OID-like strings are parsed as `Ref` variants. During resolution, if no ref with
/// that name exists and the string looks like an OID, it is resolved as an object ID,
/// so refs win over OIDs when a name is ambiguous.
#[derive(Debug, Clone)]
pub enum Revision {
    /// A reference to a branch, symbolic ref, or potentially an OID (resolved during resolution phase)
    Ref(BranchName),
    /// The Nth ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    /// Resolve to an object ID, `None` for an unborn ref or a walk past a root commit
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<Option<ObjectId>> {
        match self {
            Revision::Ref(branch_name) => {
                let name_str = branch_name.as_ref();

                match repository.refs().read_ref(branch_name.clone()) {
                    Ok(oid) => Ok(oid),
                    Err(_) if Self::looks_like_oid(name_str) => {
                        Self::resolve_oid(name_str, repository).map(Some)
                    }
                    Err(_) => Err(anyhow::anyhow!(
                        "ambiguous argument '{}': unknown revision",
                        name_str
                    )),
                }
            }
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(base_revision.resolve(repository)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_commit_parent(
        oid: Option<ObjectId>,
        repository: &Repository,
    ) -> anyhow::Result<Option<ObjectId>> {
        match oid {
            Some(oid) => {
                let commit = repository
                    .database()
                    .parse_object_as_commit(&oid)?
                    .ok_or_else(|| anyhow::anyhow!("object {} is not a commit", oid))?;

                Ok(commit.parent().copied())
            }
            None => Ok(None),
        }
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        if oid_str.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(oid_str.to_string())?;
            Self::validate_oid_is_commit(&oid, repository)?;
            return Ok(oid);
        }

        let matches = repository.database().find_objects_by_prefix(oid_str)?;

        match matches.as_slice() {
            [] => anyhow::bail!(
                "ambiguous argument '{}': unknown revision",
                oid_str
            ),
            [oid] => {
                Self::validate_oid_is_commit(oid, repository)?;
                Ok(*oid)
            }
            _ => {
                // only commits are valid candidates
                let commit_matches: Vec<_> = matches
                    .iter()
                    .filter(|oid| {
                        repository
                            .database()
                            .get_object_type(oid)
                            .map(|t| t == ObjectType::Commit)
                            .unwrap_or(false)
                    })
                    .collect();

                match commit_matches.as_slice() {
                    [] => anyhow::bail!(
                        "ambiguous argument '{}': unknown revision",
                        oid_str
                    ),
                    [oid] => Ok(**oid),
                    _ => {
                        let mut error_msg = format!(
                            "short SHA1 {} is ambiguous\nhint: The candidates are:",
                            oid_str
                        );
                        for oid in &commit_matches {
                            error_msg.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
                        }
                        anyhow::bail!(error_msg)
                    }
                }
            }
        }
    }

    fn validate_oid_is_commit(oid: &ObjectId, repository: &Repository) -> anyhow::Result<()> {
        let obj_type = repository
            .database()
            .get_object_type(oid)
            .with_context(|| format!("object {} not found", oid))?;

        if obj_type != ObjectType::Commit {
            anyhow::bail!(
                "object {} is a {}, not a commit",
                oid.to_short_oid(),
                obj_type
            );
        }

        Ok(())
    }

    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let branch_name = BranchName::try_parse(resolved_name.to_string())?;
            Ok(Revision::Ref(branch_name))
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        (MIN_ABBREV_LENGTH..=OBJECT_ID_LENGTH).contains(&s.len())
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_ref() {
        let result = Revision::try_parse("main").unwrap();
        if let Revision::Ref(name) = result {
            assert_eq!(name.as_ref(), "main");
        } else {
            panic!("Expected Ref variant");
        }
    }

    #[test]
    fn test_parse_head_alias() {
        let result = Revision::try_parse("@").unwrap();
        if let Revision::Ref(name) = result {
            assert_eq!(name.as_ref(), "HEAD");
        } else {
            panic!("Expected Ref variant");
        }
    }

    #[test]
    fn test_parse_nested_parent_of_ancestor() {
        let result = Revision::try_parse("main~2^").unwrap();
        if let Revision::Parent(base) = result {
            if let Revision::Ancestor(base, generations) = *base {
                assert_eq!(generations, 2);
                assert!(matches!(*base, Revision::Ref(ref name) if name.as_ref() == "main"));
            } else {
                panic!("Expected Ancestor variant in parent");
            }
        } else {
            panic!("Expected Parent variant");
        }
    }

    #[test]
    fn test_parse_invalid_ref_names() {
        assert!(Revision::try_parse("").is_err());
        assert!(Revision::try_parse("invalid name").is_err());
        assert!(Revision::try_parse(".invalid^").is_err());
        assert!(Revision::try_parse(".invalid~5").is_err());
    }

    #[test]
    fn test_looks_like_oid() {
        assert!(Revision::looks_like_oid("abcd"));
        assert!(Revision::looks_like_oid(&"a".repeat(40)));
        assert!(!Revision::looks_like_oid("abc"));
        assert!(!Revision::looks_like_oid(&"a".repeat(41)));
        assert!(!Revision::looks_like_oid("main"));
    }
}
