//! Binary weight-archive download.

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::routes::JobKind;
use reqwest::{Method, Response};

/// Open a streaming download of a trained job's weight archive.
///
/// Returns the raw response; read it incrementally with `bytes_stream()`
/// rather than buffering the archive in memory. The status code has
/// already been classified, so the body is the archive itself.
pub async fn download_weights(
    client: &ApiClient,
    kind: JobKind,
    id_or_name: &str,
) -> ClientResult<Response> {
    client.send_raw(Method::GET, &kind.weights_path(id_or_name), None).await
}
