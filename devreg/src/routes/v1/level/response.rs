use serde::Serialize;

#[derive(Serialize)]
pub struct PostLevel {
    pub data: PostLevelData,
}

#[derive(Serialize)]
pub struct PostLevelData {
    pub id: i64,
}

#[derive(Serialize)]
pub struct GetLevelCount {
    pub data: GetCountData,
}

#[derive(Serialize)]
pub struct GetCountData {
    pub count: u64,
}

#[derive(Serialize)]
pub struct GetLevelList {
    pub data: Vec<GetLevelData>,
    pub count: u64,
}

#[derive(Serialize)]
pub struct GetLevelSelect {
    pub data: Vec<GetLevelSelectData>,
}

#[derive(Serialize)]
pub struct GetLevelSelectData {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
pub struct GetLevel {
    pub data: GetLevelData,
}

#[derive(Serialize)]
pub struct GetLevelData {
    pub id: i64,
    pub name: String,
    #[serde(rename = "developersCount", skip_serializing_if = "Option::is_none")]
    pub developers_count: Option<u64>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}
