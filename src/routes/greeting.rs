use axum::{Json, extract::Path};
use serde::Serialize;

#[derive(Serialize)]
pub struct Greeting {
    #[serde(rename = "API diz")]
    api_diz: String,
}

pub async fn get_greeting(Path(nome): Path<String>) -> Json<Greeting> {
    Json(Greeting {
        api_diz: format!("E ai {nome}, tudo beleza?"),
    })
}
