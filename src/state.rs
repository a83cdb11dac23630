use crate::{
    db::{DbPool, OrmConn},
    media::MediaClient,
    push::PushClient,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub media: MediaClient,
    pub push: PushClient,
}
