use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, V3Methods};
use crate::rest::{build_path, filtering_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{EmailTemplateSet, V3Resource};

/// Read-only access to email template sets.
#[async_trait]
pub trait EmailTemplateSetMethods: Send + Sync {
    /// Fetches a template set with its templates.
    async fn get_email_template_set(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &str,
    ) -> Result<EmailTemplateSet, V3Error> {
        Err(V3Error::not_implemented("get_email_template_set"))
    }

    /// Lists all template sets.
    async fn list_email_template_sets(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<EmailTemplateSet>, V3Error> {
        Err(V3Error::not_implemented("list_email_template_sets"))
    }

    /// Lists the template sets matching `filters`, returning only `fields`.
    async fn list_email_template_sets_filtered(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _filters: &[(&str, &str)],
        _fields: &[&str],
    ) -> Result<Vec<EmailTemplateSet>, V3Error> {
        Err(V3Error::not_implemented("list_email_template_sets_filtered"))
    }
}

#[async_trait]
impl EmailTemplateSetMethods for V3Methods {
    async fn get_email_template_set(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &str,
    ) -> Result<EmailTemplateSet, V3Error> {
        let path = build_path("/emailTemplateSets/{id}", &[("id", id)]);
        let spec = FetchSpec::new(path, EmailTemplateSet::NAME)
            .with_query(fields_of::<EmailTemplateSet>());
        transport.get_object(ctx, &spec).await
    }

    async fn list_email_template_sets(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<EmailTemplateSet>, V3Error> {
        let spec = FetchSpec::new("/emailTemplateSets", EmailTemplateSet::PLURAL)
            .with_query(fields_of::<EmailTemplateSet>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn list_email_template_sets_filtered(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<EmailTemplateSet>, V3Error> {
        let spec = FetchSpec::new("/emailTemplateSets", EmailTemplateSet::PLURAL)
            .with_query(filtering_params(filters.iter().copied(), fields))
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }
}
