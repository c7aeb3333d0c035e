use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest name the `departments.name` column accepts.
pub const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({ "id": 1, "name": "Engineering" }))]
pub struct Department {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Engineering")]
    pub name: String,
}

/// Payload for creating or renaming a department
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewDepartment {
    #[schema(example = "Customer Success")]
    pub name: String,
}

impl NewDepartment {
    /// Returns the name as it will be stored, or a message describing why it is rejected.
    pub fn validated_name(&self) -> Result<String, String> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err("Department name must not be empty".to_string());
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(format!(
                "Department name must be at most {} characters",
                MAX_NAME_LEN
            ));
        }

        Ok(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: impl Into<String>) -> NewDepartment {
        NewDepartment { name: name.into() }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let payload = named("  Sales \n");
        assert_eq!(payload.validated_name().unwrap(), "Sales");
    }

    #[test]
    fn rejects_blank_names() {
        assert!(named("").validated_name().is_err());
        assert!(named("   ").validated_name().is_err());
    }

    #[test]
    fn length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_NAME_LEN);
        assert!(named(at_limit).validated_name().is_ok());

        let over = "a".repeat(MAX_NAME_LEN + 1);
        assert!(named(over).validated_name().is_err());
    }
}
