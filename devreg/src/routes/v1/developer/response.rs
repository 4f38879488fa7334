use serde::Serialize;

#[derive(Serialize)]
pub struct PostDeveloper {
    pub data: PostDeveloperData,
}

#[derive(Serialize)]
pub struct PostDeveloperData {
    pub id: i64,
}

#[derive(Serialize)]
pub struct GetDeveloperCount {
    pub data: GetCountData,
}

#[derive(Serialize)]
pub struct GetCountData {
    pub count: u64,
}

#[derive(Serialize)]
pub struct GetDeveloperList {
    pub data: Vec<GetDeveloperData>,
    pub count: u64,
}

#[derive(Serialize)]
pub struct GetDeveloper {
    pub data: GetDeveloperData,
}

#[derive(Serialize)]
pub struct GetDeveloperData {
    pub id: i64,
    pub name: String,
    #[serde(rename = "levelId")]
    pub level_id: i64,
    /// The name of the associated level.
    pub level: String,
    pub gender: Option<String>,
    /// `DD/MM/YYYY`.
    pub birthdate: Option<String>,
    /// Completed years since `birthdate`.
    pub age: Option<u32>,
    pub hobby: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}
