use std::sync::Arc;

use warp::filters::BoxedFilter;
use warp::Filter;
use warp::Reply;

use crate::page::{self, Endpoints};
use crate::registry::{self, SharedRegistry};
use crate::views::{self, JobIdParam};

const FORM_LIMIT: u64 = 16 * 1024;

/// Job search endpoints under `base_path`.
///
/// Requests the interceptor does not own are rejected, so the host's next
/// filter (combined with `.or`) answers them.
pub fn routes(
    base_path: &[String],
    registry: SharedRegistry,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    let page = Arc::new(page::render_search(&Endpoints::new(base_path)));
    let search_page = mount(base_path)
        .and(warp::path!("jobs" / "search"))
        .and(warp::get())
        .and(with_page(page))
        .and_then(views::search_page);
    let get_jobs = mount(base_path)
        .and(warp::path!("jobs"))
        .and(warp::get())
        .and(job_id_filter())
        .and(registry::with(registry.clone()))
        .and_then(views::get_jobs);
    let post_delete = mount(base_path)
        .and(warp::path!("jobs" / "delete"))
        .and(warp::post())
        .and(query_job_id())
        .and(form_job_id())
        .and(registry::with(registry))
        .and_then(views::post_delete);
    search_page.or(get_jobs).or(post_delete)
}

/// Redirects the bare mount point to the search page.
pub fn landing(
    base_path: &[String],
) -> Result<
    impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone,
    warp::http::uri::InvalidUri,
> {
    let search = warp::http::Uri::try_from(Endpoints::new(base_path).search())?;
    let filter = mount(base_path)
        .and(warp::path::end())
        .and(warp::get())
        .map(move || warp::redirect::see_other(search.clone()));
    Ok(filter)
}

fn mount(base_path: &[String]) -> BoxedFilter<()> {
    base_path
        .iter()
        .fold(warp::any().boxed(), |filter, segment| {
            filter.and(warp::path(segment.clone())).boxed()
        })
}

fn with_page(
    page: Arc<String>,
) -> impl Filter<Extract = (Arc<String>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || page.clone())
}

/// The query endpoint only answers when a `jobId` parameter is present.
fn job_id_filter() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    query_job_id().and_then(|param: JobIdParam| async move {
        param.job_id.ok_or_else(warp::reject::not_found)
    })
}

/// Decodes the query string as pairs, so repeated keys never reject.
fn query_job_id() -> impl Filter<Extract = (JobIdParam,), Error = std::convert::Infallible> + Clone
{
    warp::query::<Vec<(String, String)>>()
        .map(JobIdParam::from)
        .or(warp::any().map(JobIdParam::default))
        .unify()
}

fn form_job_id() -> impl Filter<Extract = (JobIdParam,), Error = std::convert::Infallible> + Clone {
    warp::body::content_length_limit(FORM_LIMIT)
        .and(warp::body::form::<Vec<(String, String)>>())
        .map(JobIdParam::from)
        .or(warp::any().map(JobIdParam::default))
        .unify()
}
