//! Ownership trait for user-owned resources.
//!
//! The original system checked ownership ad hoc per controller, and one
//! cancel path skipped the check entirely. Implementing the check once
//! here keeps enforcement uniform across every operation.

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
///
/// Implementors return the `UserId` of the owning user; the trait
/// provides the ownership checks.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning `Forbidden` if the user is not the owner.
    ///
    /// This is the method command handlers should call before mutating.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        owner: UserId,
    }

    impl OwnedByUser for TestResource {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    #[test]
    fn is_owner_matches_only_the_owner() {
        let owner = UserId::new();
        let resource = TestResource { owner };

        assert!(resource.is_owner(&owner));
        assert!(!resource.is_owner(&UserId::new()));
    }

    #[test]
    fn check_ownership_succeeds_for_owner() {
        let owner = UserId::new();
        let resource = TestResource { owner };

        assert!(resource.check_ownership(&owner).is_ok());
    }

    #[test]
    fn check_ownership_fails_with_forbidden_for_non_owner() {
        let resource = TestResource { owner: UserId::new() };
        let other = UserId::new();

        let err = resource.check_ownership(&other).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.details.get("requested_by"), Some(&other.to_string()));
    }
}
