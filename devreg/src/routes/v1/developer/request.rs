use serde::Deserialize;

#[derive(Deserialize)]
pub struct DeveloperIdPath {
    pub developer_id: i64,
}

#[derive(Deserialize)]
pub struct PostDeveloperBody {
    pub data: PostDeveloperData,
}

#[derive(Deserialize)]
pub struct PostDeveloperData {
    pub name: String,
    #[serde(rename = "levelId")]
    pub level_id: i64,
    pub gender: Option<String>,
    /// `DD/MM/YYYY`.
    pub birthdate: Option<String>,
    pub hobby: Option<String>,
}

#[derive(Deserialize)]
pub struct PutDeveloperBody {
    pub data: PutDeveloperData,
}

#[derive(Deserialize)]
pub struct PutDeveloperData {
    pub name: Option<String>,
    #[serde(rename = "levelId")]
    pub level_id: Option<i64>,
    pub gender: Option<String>,
    /// `DD/MM/YYYY`.
    pub birthdate: Option<String>,
    pub hobby: Option<String>,
}
