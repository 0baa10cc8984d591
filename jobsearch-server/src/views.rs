use std::convert::Infallible;
use std::sync::Arc;

use jobsearch::{DeleteResponse, JobRecord, JobSummary};
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::deletion::{self, DeletionError};
use crate::query::{self, SearchError};
use crate::registry::SharedRegistry;

const UNAVAILABLE_MESSAGE: &str = "Job registry unavailable";

/// `jobId` as sent in a query string or a form body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JobIdParam {
    pub job_id: Option<String>,
}

impl From<Vec<(String, String)>> for JobIdParam {
    /// The first `jobId` wins when the key is repeated.
    fn from(pairs: Vec<(String, String)>) -> Self {
        let job_id = pairs
            .into_iter()
            .find(|(key, _)| key == "jobId")
            .map(|(_, value)| value);
        JobIdParam { job_id }
    }
}

pub async fn search_page(page: Arc<String>) -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::html(page.as_ref().clone()))
}

pub async fn get_jobs(
    job_id: String,
    registry: SharedRegistry,
) -> Result<impl warp::Reply, Infallible> {
    let jobs = query::search(registry.as_ref(), &job_id).await;
    Ok(search_reply(jobs))
}

pub async fn post_delete(
    query: JobIdParam,
    form: JobIdParam,
    registry: SharedRegistry,
) -> Result<impl warp::Reply, Infallible> {
    let job_id = query.job_id.or(form.job_id).unwrap_or_default();
    let result = deletion::delete_job(registry.as_ref(), &job_id).await;
    Ok(delete_reply(result))
}

fn search_reply(jobs: Result<Vec<JobRecord>, SearchError>) -> WithStatus<Json> {
    let (reply, status) = match jobs {
        Ok(jobs) => {
            let summaries: Vec<_> = jobs.into_iter().map(JobSummary::from).collect();
            (warp::reply::json(&summaries), StatusCode::OK)
        }
        Err(SearchError::RegistryUnavailable(_)) => (
            warp::reply::json(&DeleteResponse::failed(UNAVAILABLE_MESSAGE)),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    };
    warp::reply::with_status(reply, status)
}

fn delete_reply(result: Result<(), DeletionError>) -> WithStatus<Json> {
    let (reply, status) = match result {
        Ok(()) => (DeleteResponse::deleted(), StatusCode::OK),
        Err(err) => {
            let status = err.status();
            let message = match err {
                DeletionError::RegistryUnavailable(_) => String::from(UNAVAILABLE_MESSAGE),
                other => other.to_string(),
            };
            (DeleteResponse::failed(message), status)
        }
    };
    warp::reply::with_status(warp::reply::json(&reply), status)
}

impl DeletionError {
    fn status(&self) -> StatusCode {
        match self {
            DeletionError::InvalidIdentifier => StatusCode::BAD_REQUEST,
            DeletionError::NotFound => StatusCode::NOT_FOUND,
            DeletionError::DeletionFailed(_) | DeletionError::RegistryUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
