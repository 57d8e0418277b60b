//! Reads and writes over the portal's tables.

use super::{ApiClient, ApiResult, Order, Query};
use crate::models::{
    MockTest, NewTestResult, PreviousYearPaper, SpeedTest, StudyPlan, SubjectResource,
    TestResult, TestStatistics, TestType,
};

pub(crate) fn mock_tests() -> Query {
    Query::table("mock_tests").order("created_at", Order::Desc)
}

pub(crate) fn speed_tests(subject: Option<&str>) -> Query {
    Query::table("speed_tests")
        .eq_opt("subject", subject)
        .order("created_at", Order::Desc)
}

pub(crate) fn by_id(table: &str, id: &str) -> Query {
    Query::table(table).eq("id", id)
}

pub(crate) fn test_results(student_id: &str) -> Query {
    Query::table("test_results")
        .eq("student_id", student_id)
        .order("attempted_at", Order::Desc)
}

pub(crate) fn test_results_for(test_id: &str, test_type: TestType) -> Query {
    Query::table("test_results")
        .eq("test_id", test_id)
        .eq("test_type", test_type)
        .order("attempted_at", Order::Desc)
}

pub(crate) fn previous_year_papers(branch: Option<&str>) -> Query {
    Query::table("previous_year_papers")
        .eq_opt("branch", branch)
        .order("year", Order::Desc)
}

pub(crate) fn previous_year_papers_in(year: i32) -> Query {
    Query::table("previous_year_papers")
        .eq("year", year)
        .order("branch", Order::Asc)
}

pub(crate) fn subject_resources(branch: Option<&str>, subject: Option<&str>) -> Query {
    Query::table("subject_resources")
        .eq_opt("branch", branch)
        .eq_opt("subject", subject)
        .order("created_at", Order::Desc)
}

pub(crate) fn featured_resources() -> Query {
    Query::table("subject_resources")
        .eq("is_featured", true)
        .order("rating", Order::Desc)
        .limit(6)
}

pub(crate) fn resources_of_type(kind: &str) -> Query {
    Query::table("subject_resources")
        .eq("type", kind)
        .order("rating", Order::Desc)
}

pub(crate) fn study_plans(branch: Option<&str>) -> Query {
    Query::table("study_plans")
        .eq_opt("branch", branch)
        .order("enrolled_students", Order::Desc)
}

pub(crate) fn popular_study_plans() -> Query {
    Query::table("study_plans")
        .eq("is_popular", true)
        .order("enrolled_students", Order::Desc)
        .limit(4)
}

pub(crate) fn study_plans_of_type(kind: &str) -> Query {
    Query::table("study_plans")
        .eq("type", kind)
        .order("enrolled_students", Order::Desc)
}

impl ApiClient {
    pub async fn get_mock_tests(&self) -> ApiResult<Vec<MockTest>> {
        self.select(&mock_tests()).await
    }

    pub async fn get_mock_test(&self, id: &str) -> ApiResult<Option<MockTest>> {
        self.select_one(&by_id("mock_tests", id)).await
    }

    pub async fn get_speed_tests(&self, subject: Option<&str>) -> ApiResult<Vec<SpeedTest>> {
        self.select(&speed_tests(subject)).await
    }

    pub async fn get_speed_test(&self, id: &str) -> ApiResult<Option<SpeedTest>> {
        self.select_one(&by_id("speed_tests", id)).await
    }

    pub async fn get_test_results(&self, student_id: &str) -> ApiResult<Vec<TestResult>> {
        self.select(&test_results(student_id)).await
    }

    pub async fn get_test_results_for(
        &self,
        test_id: &str,
        test_type: TestType,
    ) -> ApiResult<Vec<TestResult>> {
        self.select(&test_results_for(test_id, test_type)).await
    }

    pub async fn create_test_result(&self, result: &NewTestResult) -> ApiResult<TestResult> {
        self.insert("test_results", result).await
    }

    pub async fn get_previous_year_papers(
        &self,
        branch: Option<&str>,
    ) -> ApiResult<Vec<PreviousYearPaper>> {
        self.select(&previous_year_papers(branch)).await
    }

    pub async fn get_previous_year_papers_in(
        &self,
        year: i32,
    ) -> ApiResult<Vec<PreviousYearPaper>> {
        self.select(&previous_year_papers_in(year)).await
    }

    pub async fn get_subject_resources(
        &self,
        branch: Option<&str>,
        subject: Option<&str>,
    ) -> ApiResult<Vec<SubjectResource>> {
        self.select(&subject_resources(branch, subject)).await
    }

    pub async fn get_featured_resources(&self) -> ApiResult<Vec<SubjectResource>> {
        self.select(&featured_resources()).await
    }

    pub async fn get_resources_of_type(&self, kind: &str) -> ApiResult<Vec<SubjectResource>> {
        self.select(&resources_of_type(kind)).await
    }

    pub async fn get_study_plans(&self, branch: Option<&str>) -> ApiResult<Vec<StudyPlan>> {
        self.select(&study_plans(branch)).await
    }

    pub async fn get_popular_study_plans(&self) -> ApiResult<Vec<StudyPlan>> {
        self.select(&popular_study_plans()).await
    }

    pub async fn get_study_plans_of_type(&self, kind: &str) -> ApiResult<Vec<StudyPlan>> {
        self.select(&study_plans_of_type(kind)).await
    }

    pub async fn get_test_statistics(&self, student_id: &str) -> ApiResult<TestStatistics> {
        let rows: Vec<TestResult> = self
            .select(&Query::table("test_results").eq("student_id", student_id))
            .await?;
        Ok(TestStatistics::from_results(&rows))
    }
}
