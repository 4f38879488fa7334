use serde::Serialize;

#[derive(Serialize)]
pub struct PostUser {
    pub data: PostUserData,
}

#[derive(Serialize)]
pub struct PostUserData {
    pub id: i64,
}

#[derive(Serialize)]
pub struct GetUserCount {
    pub data: GetCountData,
}

#[derive(Serialize)]
pub struct GetCountData {
    pub count: u64,
}

#[derive(Serialize)]
pub struct GetUserList {
    pub data: Vec<GetUserData>,
    pub count: u64,
}

#[derive(Serialize)]
pub struct GetUser {
    pub data: GetUserData,
}

#[derive(Serialize)]
pub struct GetUserData {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}
