use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, V3Methods};
use crate::rest::{build_path, fields_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{Member, MemberId, V3Resource, MEMBER_DEEP_FIELDS};

/// Member operations.
#[async_trait]
pub trait MemberMethods: Send + Sync {
    /// Fetches a member.
    async fn get_member(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &MemberId,
    ) -> Result<Member, V3Error> {
        Err(V3Error::not_implemented("get_member"))
    }

    /// Fetches a member together with its applications, package keys and
    /// roles.
    async fn get_full_member(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &MemberId,
    ) -> Result<Member, V3Error> {
        Err(V3Error::not_implemented("get_full_member"))
    }

    /// Creates a member.
    async fn create_member(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _member: &Member,
    ) -> Result<Member, V3Error> {
        Err(V3Error::not_implemented("create_member"))
    }

    /// Updates a member. The member must carry its identifier.
    async fn update_member(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _member: &Member,
    ) -> Result<Member, V3Error> {
        Err(V3Error::not_implemented("update_member"))
    }

    /// Deletes a member.
    async fn delete_member(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &MemberId,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_member"))
    }

    /// Lists all members.
    async fn list_members(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<Member>, V3Error> {
        Err(V3Error::not_implemented("list_members"))
    }
}

fn member_path(id: &str) -> String {
    build_path("/members/{id}", &[("id", id)])
}

#[async_trait]
impl MemberMethods for V3Methods {
    async fn get_member(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &MemberId,
    ) -> Result<Member, V3Error> {
        let spec = FetchSpec::new(member_path(id.as_str()), Member::NAME)
            .with_query(fields_of::<Member>());
        transport.get_object(ctx, &spec).await
    }

    async fn get_full_member(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &MemberId,
    ) -> Result<Member, V3Error> {
        let spec = FetchSpec::new(member_path(id.as_str()), Member::NAME)
            .with_query(fields_params(MEMBER_DEEP_FIELDS));
        transport.get_object(ctx, &spec).await
    }

    async fn create_member(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        member: &Member,
    ) -> Result<Member, V3Error> {
        let spec = FetchSpec::new("/members", Member::NAME).with_query(fields_of::<Member>());
        transport.create_object(ctx, &spec, member).await
    }

    async fn update_member(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        member: &Member,
    ) -> Result<Member, V3Error> {
        let id = require_id(Member::NAME, member.id.as_ref())?;
        let spec = FetchSpec::new(member_path(id), Member::NAME).with_query(fields_of::<Member>());
        transport.update_object(ctx, &spec, member).await
    }

    async fn delete_member(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &MemberId,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(member_path(id.as_str()), Member::NAME);
        transport.delete_object(ctx, &spec).await
    }

    async fn list_members(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<Member>, V3Error> {
        let spec = FetchSpec::new("/members", Member::PLURAL)
            .with_query(fields_of::<Member>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }
}
