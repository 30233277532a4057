use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An `owner/name` pair addressing a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn actions_url(&self) -> String {
        format!("https://github.com/{}/{}/actions", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(Error::InvalidRepository(s.to_string())),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_creation() {
        let repo = Repository::new("owner", "name");
        assert_eq!(repo.owner, "owner");
        assert_eq!(repo.name, "name");
        assert_eq!(repo.full_name(), "owner/name");
        assert_eq!(repo.actions_url(), "https://github.com/owner/name/actions");
    }

    #[test]
    fn test_repository_from_str() {
        let repo: Repository = "myorg/myrepo".parse().unwrap();
        assert_eq!(repo, Repository::new("myorg", "myrepo"));
        assert_eq!(repo.to_string(), "myorg/myrepo");
    }

    #[test]
    fn test_repository_from_str_rejects_malformed() {
        for bad in ["myrepo", "/myrepo", "myorg/", "a/b/c"] {
            assert!(bad.parse::<Repository>().is_err(), "{bad} should not parse");
        }
    }
}
