//! Query executor
//!
//! Parses the client's query text, picks the requested operation, and
//! resolves each root field in turn. Root fields fail independently: an
//! error anywhere in one field's subtree nulls that field and records one
//! error entry while its siblings keep resolving.
//!
//! Nested selections dispatch on field name against the matching resolver
//! type; fields the resolver does not know resolve to null.

use futures::future::{BoxFuture, FutureExt};
use graphql_parser::parse_query;
use graphql_parser::query::{Definition, Document, OperationDefinition, Selection};
use serde_json::{Value as Json, json};

use super::value::{self, Variables};
use super::{FieldError, GraphqlRequest, GraphqlResponse, SchemaIndex};
use crate::core::{Error, Result};
use crate::model::{MetaRecord, PostInput};
use crate::resolver::{
    PostResolver, RootResolver, TermResolver, TermTaxonomyResolver, UserResolver,
};
use crate::service::Store;

#[derive(Clone, Copy)]
enum OperationKind {
    Query,
    Mutation,
}

/// Executes client queries against the resolver graph.
pub struct Executor {
    store: Store,
    schema: SchemaIndex,
}

impl Executor {
    pub fn new(store: Store, schema: SchemaIndex) -> Self {
        Self { store, schema }
    }

    /// Execute one request. Request-level failures (unparseable query,
    /// unknown operation) produce a null data payload with a single error;
    /// anything past that point degrades per field.
    pub async fn execute(&self, request: &GraphqlRequest) -> GraphqlResponse {
        let variables = request.variables.clone().unwrap_or_default();
        match self
            .run(&request.query, request.operation_name.as_deref(), &variables)
            .await
        {
            Ok(response) => response,
            Err(err) => GraphqlResponse::failure(err),
        }
    }

    async fn run(
        &self,
        query: &str,
        operation_name: Option<&str>,
        variables: &Variables,
    ) -> Result<GraphqlResponse> {
        let doc = parse_query::<String>(query)
            .map_err(|e| Error::BadQuery(format!("failed to parse query: {}", e)))?;
        let operation = select_operation(&doc, operation_name)?;

        match operation {
            OperationDefinition::Query(q) => Ok(self
                .resolve_roots(&q.selection_set.items, variables, OperationKind::Query)
                .await),
            OperationDefinition::SelectionSet(s) => Ok(self
                .resolve_roots(&s.items, variables, OperationKind::Query)
                .await),
            OperationDefinition::Mutation(m) => Ok(self
                .resolve_roots(&m.selection_set.items, variables, OperationKind::Mutation)
                .await),
            OperationDefinition::Subscription(_) => {
                Err(Error::BadQuery("subscriptions are not supported".to_string()))
            }
        }
    }

    async fn resolve_roots(
        &self,
        selections: &[Selection<'_, String>],
        variables: &Variables,
        kind: OperationKind,
    ) -> GraphqlResponse {
        let root = RootResolver::new(self.store.clone());
        let mut data = serde_json::Map::new();
        let mut errors = Vec::new();

        for selection in selections {
            let Selection::Field(field) = selection else {
                continue;
            };
            let resolved = match kind {
                OperationKind::Query => self.resolve_query_field(&root, field, variables).await,
                OperationKind::Mutation => {
                    self.resolve_mutation_field(&root, field, variables).await
                }
            };
            match resolved {
                Ok(value) => {
                    data.insert(field.name.clone(), value);
                }
                Err(err) => {
                    data.insert(field.name.clone(), Json::Null);
                    errors.push(FieldError::new(err, vec![field.name.clone()]));
                }
            }
        }

        GraphqlResponse {
            data: Json::Object(data),
            errors,
        }
    }

    async fn resolve_query_field(
        &self,
        root: &RootResolver,
        field: &graphql_parser::query::Field<'_, String>,
        variables: &Variables,
    ) -> Result<Json> {
        let provided: Vec<String> = field.arguments.iter().map(|(name, _)| name.clone()).collect();
        self.schema.check_query(&field.name, &provided)?;

        let selections = &field.selection_set.items;
        match field.name.as_str() {
            "users" => {
                let users = root.users().await?;
                let mut out = Vec::with_capacity(users.len());
                for user in &users {
                    out.push(resolve_user(user, selections).await?);
                }
                Ok(Json::Array(out))
            }
            "user" => {
                let id = value::require_id(field, "userID", variables)?;
                let user = root.user(&id).await?;
                resolve_user(&user, selections).await
            }
            "posts" => {
                let user_id = value::require_id(field, "userID", variables)?;
                let posts = root.posts(&user_id).await?;
                let mut out = Vec::with_capacity(posts.len());
                for post in &posts {
                    out.push(resolve_post(post, selections).await?);
                }
                Ok(Json::Array(out))
            }
            "post" => {
                let id = value::require_id(field, "postID", variables)?;
                let post = root.post(&id).await?;
                resolve_post(&post, selections).await
            }
            "terms" => {
                let taxonomy = value::string_argument(field, "taxonomy", variables)?;
                let slug = value::string_argument(field, "slug", variables)?;
                let taxonomies = root.terms(taxonomy, slug).await?;
                Ok(Json::Array(
                    taxonomies
                        .iter()
                        .map(|taxonomy| resolve_taxonomy(taxonomy, selections))
                        .collect(),
                ))
            }
            other => Err(Error::BadQuery(format!("unknown query field '{}'", other))),
        }
    }

    async fn resolve_mutation_field(
        &self,
        root: &RootResolver,
        field: &graphql_parser::query::Field<'_, String>,
        variables: &Variables,
    ) -> Result<Json> {
        let provided: Vec<String> = field.arguments.iter().map(|(name, _)| name.clone()).collect();
        self.schema.check_mutation(&field.name, &provided)?;

        match field.name.as_str() {
            "createPost" => {
                let user_id = value::require_id(field, "userID", variables)?;
                let input = post_input(field, variables)?;
                let post = root.create_post(&user_id, input).await?;
                resolve_post(&post, &field.selection_set.items).await
            }
            other => Err(Error::BadQuery(format!(
                "unknown mutation field '{}'",
                other
            ))),
        }
    }
}

fn post_input(
    field: &graphql_parser::query::Field<'_, String>,
    variables: &Variables,
) -> Result<PostInput> {
    let value = value::argument(field, "post", variables)?
        .ok_or_else(|| Error::BadQuery("missing required argument 'post'".to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| Error::BadQuery("argument 'post' must be an input object".to_string()))?;
    let title = object
        .get("title")
        .and_then(Json::as_str)
        .ok_or_else(|| Error::BadQuery("input field 'title' must be a string".to_string()))?;
    Ok(PostInput {
        title: title.to_string(),
    })
}

fn select_operation<'a, 'd>(
    doc: &'a Document<'d, String>,
    name: Option<&str>,
) -> Result<&'a OperationDefinition<'d, String>> {
    let mut operations = doc.definitions.iter().filter_map(|def| match def {
        Definition::Operation(op) => Some(op),
        _ => None,
    });
    match name {
        Some(wanted) => operations
            .find(|op| operation_name(op) == Some(wanted))
            .ok_or_else(|| Error::BadQuery(format!("operation '{}' not found", wanted))),
        None => operations
            .next()
            .ok_or_else(|| Error::BadQuery("no operation found in query".to_string())),
    }
}

fn operation_name<'a>(op: &'a OperationDefinition<'_, String>) -> Option<&'a str> {
    match op {
        OperationDefinition::Query(q) => q.name.as_deref(),
        OperationDefinition::Mutation(m) => m.name.as_deref(),
        OperationDefinition::Subscription(s) => s.name.as_deref(),
        OperationDefinition::SelectionSet(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Per-type field resolution
// ---------------------------------------------------------------------------

// User and post resolution recurse into each other (user → posts → author),
// so both walks box their futures.

fn resolve_user<'a>(
    user: &'a UserResolver,
    selections: &'a [Selection<'_, String>],
) -> BoxFuture<'a, Result<Json>> {
    async move {
        let mut out = serde_json::Map::new();
        for selection in selections {
            let Selection::Field(field) = selection else {
                continue;
            };
            let value = match field.name.as_str() {
                "userID" => json!(user.user_id()),
                "username" => json!(user.username()),
                "niceName" => json!(user.nice_name()),
                "email" => json!(user.email()),
                "url" => json!(user.url()),
                "registered" => json!(user.registered()),
                "status" => json!(user.status()),
                "displayName" => json!(user.display_name()),
                "meta" => resolve_meta_list(user.meta(), &field.selection_set.items),
                "posts" => {
                    let posts = user.posts().await?;
                    let mut list = Vec::with_capacity(posts.len());
                    for post in &posts {
                        list.push(resolve_post(post, &field.selection_set.items).await?);
                    }
                    Json::Array(list)
                }
                _ => Json::Null,
            };
            out.insert(field.name.clone(), value);
        }
        Ok(Json::Object(out))
    }
    .boxed()
}

fn resolve_post<'a>(
    post: &'a PostResolver,
    selections: &'a [Selection<'_, String>],
) -> BoxFuture<'a, Result<Json>> {
    async move {
        let mut out = serde_json::Map::new();
        for selection in selections {
            let Selection::Field(field) = selection else {
                continue;
            };
            let value = match field.name.as_str() {
                "postID" => json!(post.post_id()),
                "authorID" => json!(post.author_id()),
                "title" => json!(post.title()),
                "content" => json!(post.content()),
                "excerpt" => json!(post.excerpt()),
                "status" => json!(post.status()),
                "slug" => json!(post.slug()),
                "date" => json!(post.date()),
                "modified" => json!(post.modified()),
                "parentID" => json!(post.parent_id()),
                "postType" => json!(post.post_type()),
                "meta" => resolve_meta_list(post.meta(), &field.selection_set.items),
                "author" => {
                    let author = post.author().await?;
                    resolve_user(&author, &field.selection_set.items).await?
                }
                "terms" => {
                    let taxonomies = post.terms().await?;
                    Json::Array(
                        taxonomies
                            .iter()
                            .map(|taxonomy| {
                                resolve_taxonomy(taxonomy, &field.selection_set.items)
                            })
                            .collect(),
                    )
                }
                _ => Json::Null,
            };
            out.insert(field.name.clone(), value);
        }
        Ok(Json::Object(out))
    }
    .boxed()
}

fn resolve_taxonomy(
    taxonomy: &TermTaxonomyResolver,
    selections: &[Selection<'_, String>],
) -> Json {
    let mut out = serde_json::Map::new();
    for selection in selections {
        let Selection::Field(field) = selection else {
            continue;
        };
        let value = match field.name.as_str() {
            "termTaxonomyID" => json!(taxonomy.term_taxonomy_id()),
            "termID" => json!(taxonomy.term_id()),
            "taxonomy" => json!(taxonomy.taxonomy()),
            "description" => json!(taxonomy.description()),
            "parentID" => json!(taxonomy.parent_id()),
            "count" => json!(taxonomy.count()),
            "term" => resolve_term(&taxonomy.term(), &field.selection_set.items),
            _ => Json::Null,
        };
        out.insert(field.name.clone(), value);
    }
    Json::Object(out)
}

fn resolve_term(term: &TermResolver, selections: &[Selection<'_, String>]) -> Json {
    let mut out = serde_json::Map::new();
    for selection in selections {
        let Selection::Field(field) = selection else {
            continue;
        };
        let value = match field.name.as_str() {
            "termID" => json!(term.term_id()),
            "name" => json!(term.name()),
            "slug" => json!(term.slug()),
            "groupID" => json!(term.group_id()),
            "meta" => resolve_meta_list(term.meta(), &field.selection_set.items),
            _ => Json::Null,
        };
        out.insert(field.name.clone(), value);
    }
    Json::Object(out)
}

fn resolve_meta_list(meta: &[MetaRecord], selections: &[Selection<'_, String>]) -> Json {
    Json::Array(
        meta.iter()
            .map(|record| resolve_meta(record, selections))
            .collect(),
    )
}

fn resolve_meta(record: &MetaRecord, selections: &[Selection<'_, String>]) -> Json {
    let mut out = serde_json::Map::new();
    for selection in selections {
        let Selection::Field(field) = selection else {
            continue;
        };
        let value = match field.name.as_str() {
            "metaID" => json!(record.meta_id),
            "ownerID" => json!(record.owner_id),
            "key" => json!(record.key),
            "value" => json!(record.value),
            _ => Json::Null,
        };
        out.insert(field.name.clone(), value);
    }
    Json::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The executor's validation and identifier decoding run before any
    // database round trip, so these tests use a lazy pool with no server
    // behind it: reaching the database at all would fail the test with a
    // storage error instead of the expected codes.

    fn test_executor() -> Executor {
        let pool = sqlx::MySqlPool::connect_lazy("mysql://root@localhost/wp").unwrap();
        let schema = SchemaIndex::parse(include_str!("../../schema.graphql")).unwrap();
        Executor::new(Store::new(pool, "wpa_"), schema)
    }

    fn request(query: &str) -> GraphqlRequest {
        GraphqlRequest {
            query: query.to_string(),
            operation_name: None,
            variables: None,
        }
    }

    // -----------------------------------------------------------------------
    // Request-level failures
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn parse_errors_fail_the_whole_request() {
        let response = test_executor().execute(&request("not graphql {{{")).await;
        assert!(response.data.is_null());
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].extensions.code, "BAD_QUERY");
    }

    #[tokio::test]
    async fn fragment_only_documents_have_no_operation() {
        let response = test_executor()
            .execute(&request("fragment F on User { userID }"))
            .await;
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("no operation"));
    }

    #[tokio::test]
    async fn subscriptions_are_rejected() {
        let response = test_executor()
            .execute(&request("subscription { users { userID } }"))
            .await;
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("subscriptions"));
    }

    #[tokio::test]
    async fn named_operation_selection_finds_the_right_one() {
        let query = r#"
            query A { user(userID: "1") { userID } }
            query B { user(userID: "oops") { userID } }
        "#;
        let mut req = request(query);
        req.operation_name = Some("B".to_string());
        let response = test_executor().execute(&req).await;
        // Operation B ran: its malformed id was rejected before any I/O.
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].extensions.code, "MALFORMED_IDENTIFIER");
        assert!(response.errors[0].message.contains("oops"));
    }

    #[tokio::test]
    async fn unknown_named_operation_is_rejected() {
        let mut req = request("query A { users { userID } }");
        req.operation_name = Some("Z".to_string());
        let response = test_executor().execute(&req).await;
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("'Z'"));
    }

    // -----------------------------------------------------------------------
    // Schema validation before dispatch
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unknown_root_fields_error_per_field() {
        let response = test_executor()
            .execute(&request("{ comments { id } }"))
            .await;
        assert_eq!(response.data["comments"], Json::Null);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].extensions.code, "BAD_QUERY");
        assert_eq!(response.errors[0].path, vec!["comments".to_string()]);
    }

    #[tokio::test]
    async fn missing_required_arguments_are_rejected() {
        let response = test_executor().execute(&request("{ user { userID } }")).await;
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("userID"));
    }

    // -----------------------------------------------------------------------
    // Field-level isolation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn malformed_identifier_nulls_the_field_and_keeps_siblings() {
        let query = r#"{
            user(userID: "abc") { userID }
            post(postID: "also-bad") { postID }
        }"#;
        let response = test_executor().execute(&request(query)).await;

        assert_eq!(response.data["user"], Json::Null);
        assert_eq!(response.data["post"], Json::Null);
        assert_eq!(response.errors.len(), 2);
        for error in &response.errors {
            assert_eq!(error.extensions.code, "MALFORMED_IDENTIFIER");
        }
        assert_eq!(response.errors[0].path, vec!["user".to_string()]);
        assert_eq!(response.errors[1].path, vec!["post".to_string()]);
    }

    #[tokio::test]
    async fn variables_feed_identifier_decoding() {
        let mut req = request("query($id: ID!) { user(userID: $id) { userID } }");
        let mut variables = Variables::new();
        variables.insert("id".to_string(), json!("xyz"));
        req.variables = Some(variables);
        let response = test_executor().execute(&req).await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].extensions.code, "MALFORMED_IDENTIFIER");
    }

    #[tokio::test]
    async fn undefined_variable_is_a_field_error() {
        let response = test_executor()
            .execute(&request("query($id: ID!) { user(userID: $id) { userID } }"))
            .await;
        assert_eq!(response.data["user"], Json::Null);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].extensions.code, "BAD_QUERY");
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_post_validates_before_inserting() {
        let query = r#"mutation {
            createPost(userID: "nope", post: { title: "Hi" }) { postID }
        }"#;
        let response = test_executor().execute(&request(query)).await;
        assert_eq!(response.data["createPost"], Json::Null);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].extensions.code, "MALFORMED_IDENTIFIER");
    }

    #[tokio::test]
    async fn create_post_requires_a_string_title() {
        let query = r#"mutation {
            createPost(userID: "1", post: { title: 5 }) { postID }
        }"#;
        let response = test_executor().execute(&request(query)).await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].extensions.code, "BAD_QUERY");
        assert!(response.errors[0].message.contains("title"));
    }
}
