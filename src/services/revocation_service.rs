use chrono::Utc;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set, sea_query::OnConflict,
};

use crate::{
    dto::auth::TokenKind,
    entity::revoked_tokens::{ActiveModel as RevokedActive, Column as RevokedCol, Entity as RevokedTokens},
    error::AppResult,
};

/// Add `jti` to the revocation list. Revoking an already revoked jti is a no-op.
pub async fn revoke<C: ConnectionTrait>(conn: &C, jti: &str, kind: TokenKind) -> AppResult<()> {
    let entry = RevokedActive {
        id: NotSet,
        jti: Set(jti.to_string()),
        token_kind: Set(kind.as_str().to_string()),
        revoked_at: Set(Utc::now()),
    };

    let inserted = RevokedTokens::insert(entry)
        .on_conflict(OnConflict::column(RevokedCol::Jti).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;

    if inserted == 0 {
        tracing::debug!(%jti, "token already revoked");
    } else {
        tracing::info!(%jti, kind = kind.as_str(), "token revoked");
    }
    Ok(())
}

pub async fn is_revoked<C: ConnectionTrait>(conn: &C, jti: &str) -> AppResult<bool> {
    let hits = RevokedTokens::find()
        .filter(RevokedCol::Jti.eq(jti))
        .count(conn)
        .await?;
    Ok(hits > 0)
}
