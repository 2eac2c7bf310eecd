//! Batch upload coordinator.
//!
//! Fans out one upload per file and joins the results in input order. The
//! batch is all-or-nothing: the first failed upload fails the whole batch,
//! the remaining uploads are dropped and no partial result is returned.
//!
//! There is no concurrency cap; N files means N simultaneous requests.

use futures::future::try_join_all;
use tracing::{debug, instrument, warn};
use vitrine_core::FileUpload;

use crate::api::{ApiError, ProductsApi};

/// Upload every file concurrently and return the server-assigned names in
/// the order the files were given.
///
/// An empty batch resolves immediately without any request.
///
/// # Errors
///
/// Returns the error of the first upload that fails.
#[instrument(skip(api, files), fields(count = files.len()))]
pub async fn upload_all<A>(api: &A, files: &[FileUpload]) -> Result<Vec<String>, ApiError>
where
    A: ProductsApi + ?Sized,
{
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let uploads = files.iter().map(|file| api.upload_file(file));
    let names = try_join_all(uploads).await.inspect_err(|e| {
        warn!(error = %e, "Batch upload failed, discarding completed uploads");
    })?;

    debug!(count = names.len(), "Batch upload complete");
    Ok(names)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    fn file(name: &str) -> FileUpload {
        FileUpload::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_calls() {
        let api = FakeApi::default();
        let names = upload_all(&api, &[]).await.unwrap();
        assert!(names.is_empty());
        assert_eq!(api.upload_calls(), 0);
    }

    #[tokio::test]
    async fn test_results_keep_input_order() {
        let api = FakeApi::default();
        // a finishes last, b first
        api.delay_upload("a.png", 3);
        api.delay_upload("c.png", 1);

        let names = upload_all(&api, &[file("a.png"), file("b.png"), file("c.png")])
            .await
            .unwrap();
        assert_eq!(names, vec!["srv-a.png", "srv-b.png", "srv-c.png"]);
        assert_eq!(api.upload_calls(), 3);
    }

    #[tokio::test]
    async fn test_uploads_run_concurrently() {
        let api = FakeApi::default();
        for name in ["a.png", "b.png", "c.png", "d.png"] {
            api.delay_upload(name, 2);
        }

        let files: Vec<_> = ["a.png", "b.png", "c.png", "d.png"]
            .into_iter()
            .map(file)
            .collect();
        upload_all(&api, &files).await.unwrap();
        assert_eq!(api.max_in_flight_uploads(), 4);
    }

    #[tokio::test]
    async fn test_one_failure_fails_the_batch() {
        let api = FakeApi::default();
        api.fail_upload("b.png");

        let err = upload_all(&api, &[file("a.png"), file("b.png"), file("c.png")])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, ref body } if body == "b.png"));
    }

    #[tokio::test]
    async fn test_single_file() {
        let api = FakeApi::default();
        let names = upload_all(&api, &[file("only.png")]).await.unwrap();
        assert_eq!(names, vec!["srv-only.png"]);
    }
}
