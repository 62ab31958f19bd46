//! LeetCode API client.
//!
//! Scrapes the catalog of solved problems and, for each accepted one, the
//! problem statement plus the code of the newest accepted submission.
//! Requests are issued one at a time with a fixed pause per problem.

mod queries;

use reqwest::header::{ACCEPT, COOKIE, REFERER};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::JudgeConfig;
use crate::models::{Difficulty, SolvedProblem};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Longest response excerpt carried in an error message.
const BODY_SNIPPET_CHARS: usize = 180;

const OP_PROBLEM_LIST: &str = "problem list";
const OP_QUESTION_DETAIL: &str = "question detail";
const OP_SUBMISSION_LIST: &str = "submission list";
const OP_SUBMISSION_DETAILS: &str = "submission details";

#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("{operation} request failed: {source}")]
    Http {
        operation: &'static str,
        source: reqwest::Error,
    },
    #[error(
        "{operation} returned HTTP {status}: {body} (the LeetCode session cookie or CSRF token may have expired)"
    )]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error(
        "{operation} returned a non-JSON body: {body} (the LeetCode session cookie or CSRF token may have expired)"
    )]
    InvalidJson { operation: &'static str, body: String },
    #[error(
        "{operation} returned GraphQL errors: {message} (the LeetCode session cookie or CSRF token may have expired)"
    )]
    GraphQl {
        operation: &'static str,
        message: String,
    },
    #[error(
        "{operation} response has no data (the LeetCode session cookie or CSRF token may have expired)"
    )]
    MissingData { operation: &'static str },
    #[error("{operation} response has an unexpected shape: {detail}")]
    InvalidPayload {
        operation: &'static str,
        detail: String,
    },
}

pub type JudgeResult<T> = Result<T, JudgeError>;

#[derive(Clone)]
pub struct LeetCodeClient {
    config: JudgeConfig,
    client: Client,
}

impl LeetCodeClient {
    pub fn new(config: JudgeConfig) -> JudgeResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| JudgeError::Http {
                operation: "client setup",
                source,
            })?;
        Ok(Self { config, client })
    }

    /// Every solved problem's latest accepted submission, oldest first.
    ///
    /// Any API failure aborts the whole scrape; problems without a
    /// retrievable submission or with empty code are skipped.
    pub async fn list_solved(&self) -> JudgeResult<Vec<SolvedProblem>> {
        let catalog = self.fetch_catalog().await?;
        let accepted = catalog
            .stat_status_pairs
            .into_iter()
            .filter(|pair| pair.status.as_deref() == Some("ac"))
            .map(|pair| pair.stat)
            .collect::<Vec<_>>();
        tracing::info!("Found {} accepted problems", accepted.len());

        let mut solved = Vec::with_capacity(accepted.len());
        for stat in accepted {
            tokio::time::sleep(self.config.request_delay).await;
            if let Some(problem) = self.fetch_solved(stat).await? {
                solved.push(problem);
            }
        }

        solved.sort_by_key(|problem| problem.timestamp);
        Ok(solved)
    }

    async fn fetch_catalog(&self) -> JudgeResult<ProblemCatalog> {
        let request = self
            .client
            .get(format!("{}/api/problems/all/", self.config.base_url))
            .header(ACCEPT, "application/json");
        let body = self.send(OP_PROBLEM_LIST, request).await?;
        decode(OP_PROBLEM_LIST, body)
    }

    async fn fetch_solved(&self, stat: ProblemStat) -> JudgeResult<Option<SolvedProblem>> {
        let slug = stat.title_slug;
        tracing::debug!("Fetching {slug}");

        let detail: QuestionDetailData = self
            .graphql(OP_QUESTION_DETAIL, &slug, &queries::question_detail(&slug))
            .await?;
        let question = detail.question.ok_or(JudgeError::MissingData {
            operation: OP_QUESTION_DETAIL,
        })?;

        let listing: SubmissionListData = self
            .graphql(OP_SUBMISSION_LIST, &slug, &queries::submission_list(&slug))
            .await?;
        let submissions = listing
            .question_submission_list
            .ok_or(JudgeError::MissingData {
                operation: OP_SUBMISSION_LIST,
            })?
            .submissions;
        let Some(latest) = submissions.into_iter().next() else {
            tracing::warn!("Skipping {slug}: no accepted submissions returned");
            return Ok(None);
        };

        let submission_id = latest.id.as_i64(OP_SUBMISSION_LIST, "id")?;
        let timestamp = latest.timestamp.as_i64(OP_SUBMISSION_LIST, "timestamp")?;

        let details: SubmissionDetailsData = self
            .graphql(
                OP_SUBMISSION_DETAILS,
                &slug,
                &queries::submission_details(submission_id),
            )
            .await?;
        let code = details
            .submission_details
            .ok_or(JudgeError::MissingData {
                operation: OP_SUBMISSION_DETAILS,
            })?
            .code
            .unwrap_or_default();
        if code.trim().is_empty() {
            tracing::warn!("Skipping {slug}: submission {submission_id} has no code");
            return Ok(None);
        }

        Ok(Some(SolvedProblem {
            id: stat.frontend_question_id.as_u32(OP_PROBLEM_LIST, "frontend_question_id")?,
            title: stat.title,
            title_slug: slug,
            content: question.content.unwrap_or_default(),
            difficulty: Difficulty::from(question.difficulty),
            skills: question.topic_tags.into_iter().map(|tag| tag.name).collect(),
            timestamp,
            language: latest.lang_name,
            code,
        }))
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        slug: &str,
        payload: &Value,
    ) -> JudgeResult<T> {
        let request = self
            .client
            .post(format!("{}/graphql", self.config.base_url))
            .header(REFERER, format!("{}/problems/{slug}", self.config.base_url))
            .header("x-csrftoken", &self.config.csrf_token)
            .json(payload);
        let body = self.send(operation, request).await?;
        let envelope: GraphQlEnvelope = decode(operation, body)?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let message = errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(JudgeError::GraphQl { operation, message });
        }

        let data = envelope
            .data
            .filter(|data| !data.is_null())
            .ok_or(JudgeError::MissingData { operation })?;
        serde_json::from_value(data).map_err(|error| JudgeError::InvalidPayload {
            operation,
            detail: error.to_string(),
        })
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> JudgeResult<Value> {
        let response = request
            .header(COOKIE, self.cookie_header())
            .send()
            .await
            .map_err(|source| JudgeError::Http { operation, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| JudgeError::Http { operation, source })?;

        if !status.is_success() {
            return Err(JudgeError::Status {
                operation,
                status: status.as_u16(),
                body: body_snippet(&body),
            });
        }

        serde_json::from_str(&body).map_err(|_| JudgeError::InvalidJson {
            operation,
            body: body_snippet(&body),
        })
    }

    fn cookie_header(&self) -> String {
        format!(
            "LEETCODE_SESSION={}; csrftoken={}",
            self.config.session, self.config.csrf_token
        )
    }
}

/// One-line excerpt of a response body. Login and rate-limit pages come back
/// as multi-line HTML, so whitespace runs collapse to a single space.
fn body_snippet(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(BODY_SNIPPET_CHARS)
        .collect()
}

fn decode<T: DeserializeOwned>(operation: &'static str, body: Value) -> JudgeResult<T> {
    serde_json::from_value(body).map_err(|error| JudgeError::InvalidPayload {
        operation,
        detail: error.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The judge is inconsistent about quoting numeric ids and timestamps.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(i64),
    Text(String),
}

impl Numeric {
    fn as_i64(&self, operation: &'static str, field: &str) -> JudgeResult<i64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| JudgeError::InvalidPayload {
                        operation,
                        detail: format!("`{field}` is not numeric: {text}"),
                    })
            }
        }
    }

    fn as_u32(&self, operation: &'static str, field: &str) -> JudgeResult<u32> {
        let value = self.as_i64(operation, field)?;
        u32::try_from(value).map_err(|_| JudgeError::InvalidPayload {
            operation,
            detail: format!("`{field}` is out of range: {value}"),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ProblemCatalog {
    stat_status_pairs: Vec<StatStatusPair>,
}

#[derive(Debug, Deserialize)]
struct StatStatusPair {
    stat: ProblemStat,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProblemStat {
    frontend_question_id: Numeric,
    #[serde(rename = "question__title")]
    title: String,
    #[serde(rename = "question__title_slug")]
    title_slug: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct QuestionDetailData {
    question: Option<QuestionDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDetail {
    content: Option<String>,
    difficulty: String,
    #[serde(default)]
    topic_tags: Vec<TopicTag>,
}

#[derive(Debug, Deserialize)]
struct TopicTag {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionListData {
    question_submission_list: Option<SubmissionList>,
}

#[derive(Debug, Deserialize)]
struct SubmissionList {
    #[serde(default)]
    submissions: Vec<SubmissionSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionSummary {
    id: Numeric,
    timestamp: Numeric,
    lang_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionDetailsData {
    submission_details: Option<SubmissionDetails>,
}

#[derive(Debug, Deserialize)]
struct SubmissionDetails {
    code: Option<String>,
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use mockito::{Matcher, Server, ServerGuard};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    /// A solved problem as served by the mock judge.
    pub struct MockProblem {
        pub id: u32,
        pub title: &'static str,
        pub slug: &'static str,
        pub difficulty: &'static str,
        pub tags: &'static [&'static str],
        pub submission_id: i64,
        pub timestamp: i64,
        pub language: &'static str,
        pub code: &'static str,
    }

    pub fn client_for(server: &ServerGuard) -> LeetCodeClient {
        let config = JudgeConfig::new(server.url(), "session", "csrf")
            .unwrap()
            .with_request_delay(Duration::ZERO);
        LeetCodeClient::new(config).unwrap()
    }

    pub async fn mock_catalog(server: &mut ServerGuard, pairs: serde_json::Value) {
        server
            .mock("GET", "/api/problems/all/")
            .match_header("cookie", "LEETCODE_SESSION=session; csrftoken=csrf")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "stat_status_pairs": pairs }).to_string())
            .create_async()
            .await;
    }

    pub fn catalog_entry(problem: &MockProblem, status: Option<&str>) -> serde_json::Value {
        json!({
            "stat": {
                "frontend_question_id": problem.id,
                "question__title": problem.title,
                "question__title_slug": problem.slug,
            },
            "status": status,
        })
    }

    async fn mock_graphql(server: &mut ServerGuard, matcher: serde_json::Value, body: serde_json::Value) {
        server
            .mock("POST", "/graphql")
            .match_body(Matcher::PartialJson(matcher))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;
    }

    /// Serve the full catalog plus all per-problem GraphQL responses.
    pub async fn serve_problems(server: &mut ServerGuard, problems: &[MockProblem]) {
        let pairs = problems
            .iter()
            .map(|problem| catalog_entry(problem, Some("ac")))
            .collect::<Vec<_>>();
        mock_catalog(server, json!(pairs)).await;

        for problem in problems {
            serve_details(server, problem).await;
        }
    }

    /// Serve the three GraphQL responses for one problem.
    pub async fn serve_details(server: &mut ServerGuard, problem: &MockProblem) {
        mock_question(server, problem).await;
        mock_graphql(
            server,
            json!({
                "operationName": "submissionList",
                "variables": { "questionSlug": problem.slug },
            }),
            json!({
                "data": {
                    "questionSubmissionList": {
                        "lastKey": null,
                        "hasNext": false,
                        "submissions": [{
                            "id": problem.submission_id.to_string(),
                            "statusDisplay": "Accepted",
                            "lang": "cpp",
                            "langName": problem.language,
                            "timestamp": problem.timestamp.to_string(),
                        }],
                    }
                }
            }),
        )
        .await;
        mock_graphql(
            server,
            json!({
                "operationName": "submissionDetails",
                "variables": { "submissionId": problem.submission_id },
            }),
            json!({ "data": { "submissionDetails": { "code": problem.code } } }),
        )
        .await;
    }

    async fn mock_question(server: &mut ServerGuard, problem: &MockProblem) {
        let tags = problem
            .tags
            .iter()
            .map(|name| json!({ "name": name, "slug": name.to_lowercase() }))
            .collect::<Vec<_>>();
        mock_graphql(
            server,
            json!({
                "operationName": "questionDetail",
                "variables": { "titleSlug": problem.slug },
            }),
            json!({
                "data": {
                    "question": {
                        "questionFrontendId": problem.id.to_string(),
                        "title": problem.title,
                        "content": format!("<p>{} statement</p>", problem.title),
                        "difficulty": problem.difficulty,
                        "topicTags": tags,
                    }
                }
            }),
        )
        .await;
    }

    pub const TWO_SUM: MockProblem = MockProblem {
        id: 1,
        title: "Two Sum",
        slug: "two-sum",
        difficulty: "Easy",
        tags: &["Hash Table", "Array"],
        submission_id: 1001,
        timestamp: 1_700_000_500,
        language: "C++",
        code: "  class Solution {};\n\n",
    };

    pub const ADD_TWO_NUMBERS: MockProblem = MockProblem {
        id: 2,
        title: "Add Two Numbers",
        slug: "add-two-numbers",
        difficulty: "Medium",
        tags: &["Linked List", "Math", "Recursion"],
        submission_id: 1002,
        timestamp: 1_700_000_100,
        language: "Python3",
        code: "class Solution:\n    pass\n",
    };

    #[tokio::test]
    async fn list_solved_returns_accepted_problems_oldest_first() {
        let mut server = Server::new_async().await;
        serve_problems(&mut server, &[TWO_SUM, ADD_TWO_NUMBERS]).await;

        let solved = client_for(&server).list_solved().await.unwrap();

        let ids = solved.iter().map(|problem| problem.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 1]);

        let two_sum = &solved[1];
        assert_eq!(two_sum.title, "Two Sum");
        assert_eq!(two_sum.difficulty, Difficulty::Easy);
        assert_eq!(two_sum.skills, vec!["Hash Table", "Array"]);
        assert_eq!(two_sum.language, "C++");
        assert_eq!(two_sum.timestamp, 1_700_000_500);
        assert_eq!(two_sum.code, "  class Solution {};\n\n");
        assert_eq!(two_sum.content, "<p>Two Sum statement</p>");
    }

    #[tokio::test]
    async fn list_solved_ignores_unsolved_and_attempted_problems() {
        let mut server = Server::new_async().await;
        mock_catalog(
            &mut server,
            json!([
                catalog_entry(&TWO_SUM, Some("notac")),
                catalog_entry(&ADD_TWO_NUMBERS, None),
            ]),
        )
        .await;

        let solved = client_for(&server).list_solved().await.unwrap();
        assert!(solved.is_empty());
    }

    #[tokio::test]
    async fn list_solved_skips_problem_without_submissions() {
        let mut server = Server::new_async().await;
        mock_catalog(&mut server, json!([catalog_entry(&TWO_SUM, Some("ac"))])).await;
        mock_question(&mut server, &TWO_SUM).await;
        mock_graphql(
            &mut server,
            json!({ "operationName": "submissionList" }),
            json!({ "data": { "questionSubmissionList": { "submissions": [] } } }),
        )
        .await;

        let solved = client_for(&server).list_solved().await.unwrap();
        assert!(solved.is_empty());
    }

    #[tokio::test]
    async fn list_solved_skips_problem_with_empty_code() {
        let mut server = Server::new_async().await;
        let blank = MockProblem {
            code: "   \n",
            ..TWO_SUM
        };
        serve_problems(&mut server, &[blank]).await;

        let solved = client_for(&server).list_solved().await.unwrap();
        assert!(solved.is_empty());
    }

    #[tokio::test]
    async fn forbidden_status_is_fatal_and_names_operation() {
        let mut server = Server::new_async().await;
        mock_catalog(&mut server, json!([catalog_entry(&TWO_SUM, Some("ac"))])).await;
        server
            .mock("POST", "/graphql")
            .with_status(403)
            .with_body("Forbidden")
            .create_async()
            .await;

        let error = client_for(&server).list_solved().await.unwrap_err();
        assert!(matches!(
            error,
            JudgeError::Status {
                operation: OP_QUESTION_DETAIL,
                status: 403,
                ..
            }
        ));
        assert!(error.to_string().contains("may have expired"));
    }

    #[tokio::test]
    async fn non_json_body_is_fatal() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/problems/all/")
            .with_status(200)
            .with_body("<html>login</html>")
            .create_async()
            .await;

        let error = client_for(&server).list_solved().await.unwrap_err();
        assert!(matches!(
            error,
            JudgeError::InvalidJson {
                operation: OP_PROBLEM_LIST,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn graphql_errors_are_fatal() {
        let mut server = Server::new_async().await;
        mock_catalog(&mut server, json!([catalog_entry(&TWO_SUM, Some("ac"))])).await;
        mock_graphql(
            &mut server,
            json!({ "operationName": "questionDetail" }),
            json!({ "errors": [{ "message": "User is not authenticated" }], "data": null }),
        )
        .await;

        let error = client_for(&server).list_solved().await.unwrap_err();
        match error {
            JudgeError::GraphQl { operation, message } => {
                assert_eq!(operation, OP_QUESTION_DETAIL);
                assert_eq!(message, "User is not authenticated");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_data_is_fatal() {
        let mut server = Server::new_async().await;
        mock_catalog(&mut server, json!([catalog_entry(&TWO_SUM, Some("ac"))])).await;
        mock_graphql(
            &mut server,
            json!({ "operationName": "questionDetail" }),
            json!({}),
        )
        .await;

        let error = client_for(&server).list_solved().await.unwrap_err();
        assert!(matches!(
            error,
            JudgeError::MissingData {
                operation: OP_QUESTION_DETAIL
            }
        ));
    }

    #[tokio::test]
    async fn status_error_carries_one_line_body_excerpt() {
        let mut server = Server::new_async().await;
        let page = format!(
            "<html>\n  <head><title>429 Too Many Requests</title></head>\n  <body>{}</body>\n</html>",
            "slow down ".repeat(40)
        );
        server
            .mock("GET", "/api/problems/all/")
            .with_status(429)
            .with_body(page)
            .create_async()
            .await;

        let error = client_for(&server).list_solved().await.unwrap_err();
        match error {
            JudgeError::Status { status, body, .. } => {
                assert_eq!(status, 429);
                assert!(body.starts_with(
                    "<html> <head><title>429 Too Many Requests</title></head> <body>slow down"
                ));
                assert!(!body.contains('\n'));
                assert_eq!(body.chars().count(), BODY_SNIPPET_CHARS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn body_snippet_keeps_short_bodies_whole() {
        assert_eq!(body_snippet("  Forbidden\n"), "Forbidden");
        assert_eq!(body_snippet(""), "");
    }

    #[test]
    fn numeric_accepts_numbers_and_strings() {
        assert_eq!(Numeric::Number(7).as_i64("op", "id").unwrap(), 7);
        assert_eq!(
            Numeric::Text(" 1700000000 ".to_string())
                .as_i64("op", "timestamp")
                .unwrap(),
            1_700_000_000
        );
        assert!(Numeric::Text("soon".to_string()).as_i64("op", "timestamp").is_err());
        assert!(Numeric::Number(-1).as_u32("op", "id").is_err());
    }
}
