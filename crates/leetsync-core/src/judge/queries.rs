//! GraphQL documents sent to the judge.

use serde_json::{json, Value};

/// Status code the judge uses for accepted submissions.
const ACCEPTED_STATUS: i64 = 10;

/// Newest submissions first; only the head of the list is used.
const SUBMISSION_PAGE_SIZE: i64 = 20;

const QUESTION_DETAIL: &str = r"
query questionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionFrontendId
    title
    content
    difficulty
    topicTags {
      name
      slug
    }
  }
}";

const SUBMISSION_LIST: &str = r"
query submissionList($offset: Int!, $limit: Int!, $lastKey: String, $questionSlug: String!, $status: Int) {
  questionSubmissionList(
    offset: $offset
    limit: $limit
    lastKey: $lastKey
    questionSlug: $questionSlug
    status: $status
  ) {
    lastKey
    hasNext
    submissions {
      id
      statusDisplay
      lang
      langName
      timestamp
    }
  }
}";

const SUBMISSION_DETAILS: &str = r"
query submissionDetails($submissionId: Int!) {
  submissionDetails(submissionId: $submissionId) {
    timestamp
    code
    lang {
      name
      verboseName
    }
  }
}";

pub fn question_detail(title_slug: &str) -> Value {
    json!({
        "operationName": "questionDetail",
        "query": QUESTION_DETAIL,
        "variables": { "titleSlug": title_slug },
    })
}

pub fn submission_list(title_slug: &str) -> Value {
    json!({
        "operationName": "submissionList",
        "query": SUBMISSION_LIST,
        "variables": {
            "offset": 0,
            "limit": SUBMISSION_PAGE_SIZE,
            "lastKey": null,
            "questionSlug": title_slug,
            "status": ACCEPTED_STATUS,
        },
    })
}

pub fn submission_details(submission_id: i64) -> Value {
    json!({
        "operationName": "submissionDetails",
        "query": SUBMISSION_DETAILS,
        "variables": { "submissionId": submission_id },
    })
}
