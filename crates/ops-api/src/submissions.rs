use ops_core::Pagination;
use ops_core::responses::SubmissionsPage;
use ops_schema::names;

use crate::client::ApiClient;
use crate::decode::{Shape, decode};
use crate::error::ApiError;

const SUBMISSIONS_SHAPE: Shape = Shape {
    schema: names::SUBMISSIONS_PAGE,
    expected: "expected object with submissions, total, page, and perPage",
};

impl ApiClient {
    /// One page of form submissions (leads). `total`, `page` and `perPage`
    /// are returned exactly as the backend reports them.
    ///
    /// # Errors
    ///
    /// Returns the request failure or `ApiError::InvalidResponse`.
    pub async fn list_submissions(
        &self,
        pagination: Pagination,
    ) -> Result<SubmissionsPage, ApiError> {
        let value = self
            .get(&format!("/submissions?{}", pagination.to_query()))
            .await?;
        decode(value, SUBMISSIONS_SHAPE)
    }
}
