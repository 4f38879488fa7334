use serde::Deserialize;

#[derive(Deserialize)]
pub struct UserIdPath {
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct PostUserBody {
    pub data: PostUserData,
}

#[derive(Deserialize)]
pub struct PostUserData {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct PutUserBody {
    pub data: PutUserData,
}

#[derive(Deserialize)]
pub struct PutUserData {
    pub name: Option<String>,
    pub email: Option<String>,
}
