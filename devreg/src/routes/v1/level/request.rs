use serde::Deserialize;

#[derive(Deserialize)]
pub struct LevelIdPath {
    pub level_id: i64,
}

#[derive(Deserialize)]
pub struct PostLevelBody {
    pub data: PostLevelData,
}

#[derive(Deserialize)]
pub struct PostLevelData {
    pub name: String,
}

#[derive(Deserialize)]
pub struct PutLevelBody {
    pub data: PutLevelData,
}

#[derive(Deserialize)]
pub struct PutLevelData {
    pub name: Option<String>,
}
