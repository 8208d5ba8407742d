//! Schema declaration index
//!
//! The schema description is plain SDL text loaded at startup. The index
//! extracts the root operation fields (name plus required argument names)
//! so the executor can reject unknown fields and missing arguments before
//! any resolver runs. A schema that fails to parse aborts startup; that is
//! the only fatal construction error in the system.

use std::collections::HashMap;

use graphql_parser::parse_schema;
use graphql_parser::schema::{Definition, ObjectType, Type, TypeDefinition};

use crate::core::{Error, Result};

#[derive(Debug, Clone)]
struct OperationDecl {
    required_args: Vec<String>,
}

/// Root operation declarations extracted from the SDL.
#[derive(Debug, Clone)]
pub struct SchemaIndex {
    query: HashMap<String, OperationDecl>,
    mutation: HashMap<String, OperationDecl>,
}

impl SchemaIndex {
    /// Parse SDL text and index its root operation fields.
    ///
    /// Honors an explicit `schema { query: ... }` block; defaults to the
    /// conventional `Query` / `Mutation` type names otherwise.
    pub fn parse(sdl: &str) -> Result<Self> {
        let doc = parse_schema::<String>(sdl)
            .map_err(|e| Error::Schema(format!("failed to parse schema: {}", e)))?;

        let mut query_type = "Query".to_string();
        let mut mutation_type = "Mutation".to_string();
        for def in &doc.definitions {
            if let Definition::SchemaDefinition(schema) = def {
                if let Some(name) = &schema.query {
                    query_type = name.clone();
                }
                if let Some(name) = &schema.mutation {
                    mutation_type = name.clone();
                }
            }
        }

        let mut query = HashMap::new();
        let mut mutation = HashMap::new();
        for def in &doc.definitions {
            if let Definition::TypeDefinition(TypeDefinition::Object(object)) = def {
                if object.name == query_type {
                    query = index_fields(object);
                } else if object.name == mutation_type {
                    mutation = index_fields(object);
                }
            }
        }

        if query.is_empty() {
            return Err(Error::Schema(
                "schema declares no query operations".to_string(),
            ));
        }

        Ok(Self { query, mutation })
    }

    /// Validate a requested query field against the declaration.
    pub fn check_query(&self, field: &str, provided_args: &[String]) -> Result<()> {
        check(&self.query, "query", field, provided_args)
    }

    /// Validate a requested mutation field against the declaration.
    pub fn check_mutation(&self, field: &str, provided_args: &[String]) -> Result<()> {
        check(&self.mutation, "mutation", field, provided_args)
    }
}

fn check(
    declarations: &HashMap<String, OperationDecl>,
    kind: &str,
    field: &str,
    provided_args: &[String],
) -> Result<()> {
    let decl = declarations.get(field).ok_or_else(|| {
        Error::BadQuery(format!("unknown {} field '{}'", kind, field))
    })?;
    for required in &decl.required_args {
        if !provided_args.iter().any(|arg| arg == required) {
            return Err(Error::BadQuery(format!(
                "field '{}' requires argument '{}'",
                field, required
            )));
        }
    }
    Ok(())
}

fn index_fields(object: &ObjectType<'_, String>) -> HashMap<String, OperationDecl> {
    object
        .fields
        .iter()
        .map(|field| {
            let required_args = field
                .arguments
                .iter()
                .filter(|arg| {
                    matches!(arg.value_type, Type::NonNullType(_)) && arg.default_value.is_none()
                })
                .map(|arg| arg.name.clone())
                .collect();
            (field.name.clone(), OperationDecl { required_args })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = r#"
        schema {
            query: Query
            mutation: Mutation
        }

        type Query {
            users: [User!]!
            user(userID: ID!): User
            terms(taxonomy: String, slug: String): [TermTaxonomy!]!
        }

        type Mutation {
            createPost(userID: ID!, post: PostInput!): Post
        }

        type User { userID: ID! }
        type Post { postID: ID! }
        type TermTaxonomy { termTaxonomyID: ID! }
        input PostInput { title: String! }
    "#;

    #[test]
    fn accepts_declared_fields_with_their_arguments() {
        let index = SchemaIndex::parse(SDL).unwrap();
        index.check_query("users", &[]).unwrap();
        index
            .check_query("user", &["userID".to_string()])
            .unwrap();
        // Optional arguments may be omitted.
        index.check_query("terms", &[]).unwrap();
        index
            .check_mutation(
                "createPost",
                &["userID".to_string(), "post".to_string()],
            )
            .unwrap();
    }

    #[test]
    fn rejects_unknown_fields() {
        let index = SchemaIndex::parse(SDL).unwrap();
        let err = index.check_query("comments", &[]).unwrap_err();
        assert_eq!(err.error_code(), "BAD_QUERY");
        assert!(err.to_string().contains("comments"));
    }

    #[test]
    fn rejects_missing_required_arguments() {
        let index = SchemaIndex::parse(SDL).unwrap();
        let err = index.check_query("user", &[]).unwrap_err();
        assert_eq!(err.error_code(), "BAD_QUERY");
        assert!(err.to_string().contains("userID"));

        let err = index
            .check_mutation("createPost", &["userID".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("post"));
    }

    #[test]
    fn queries_and_mutations_are_separate_namespaces() {
        let index = SchemaIndex::parse(SDL).unwrap();
        assert!(index.check_query("createPost", &[]).is_err());
        assert!(index.check_mutation("users", &[]).is_err());
    }

    #[test]
    fn unparseable_sdl_is_fatal() {
        let err = SchemaIndex::parse("type Query {").unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
    }

    #[test]
    fn schema_without_query_type_is_fatal() {
        let err = SchemaIndex::parse("type Foo { id: ID! }").unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
    }

    #[test]
    fn shipped_schema_parses_and_declares_the_entry_points() {
        let index = SchemaIndex::parse(include_str!("../../schema.graphql")).unwrap();
        index.check_query("users", &[]).unwrap();
        index.check_query("user", &["userID".to_string()]).unwrap();
        index
            .check_query("posts", &["userID".to_string()])
            .unwrap();
        index.check_query("post", &["postID".to_string()]).unwrap();
        index.check_query("terms", &[]).unwrap();
        index
            .check_mutation(
                "createPost",
                &["userID".to_string(), "post".to_string()],
            )
            .unwrap();
    }
}
