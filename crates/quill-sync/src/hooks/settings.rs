use quill_api::ApiClient;
use quill_core::entities::{AccountSettings, AppearanceSettings};
use quill_core::requests::{AppearanceUpdate, PasswordChange};
use quill_query::{Mutation, Query, QueryClient};

use super::{fetch_with, mutate_with, names};
use crate::keys;

#[derive(Debug, Clone)]
pub struct SettingsHooks {
    client: QueryClient,
    api: ApiClient,
}

impl SettingsHooks {
    #[must_use]
    pub const fn new(client: QueryClient, api: ApiClient) -> Self {
        Self { client, api }
    }

    #[must_use]
    pub fn account(&self) -> Query<AccountSettings> {
        self.client.query(
            keys::account_settings(),
            fetch_with(&self.api, |api| async move { api.account_settings().await }),
        )
    }

    #[must_use]
    pub fn appearance(&self) -> Query<AppearanceSettings> {
        self.client.query(
            keys::appearance_settings(),
            fetch_with(&self.api, |api| async move { api.appearance_settings().await }),
        )
    }

    /// Name and email also appear on the current user, so both refresh.
    #[must_use]
    pub fn update_account(&self) -> Mutation<AccountSettings, AccountSettings> {
        self.client
            .mutation(
                names::UPDATE_ACCOUNT,
                mutate_with(&self.api, |api, settings: AccountSettings| async move {
                    api.update_account_settings(&settings).await
                }),
            )
            .updates(|cache, _, saved| cache.set_data(&keys::account_settings(), saved.clone()))
            .invalidates(|_, _| vec![keys::current_user()])
    }

    #[must_use]
    pub fn update_appearance(&self) -> Mutation<AppearanceUpdate, AppearanceSettings> {
        self.client
            .mutation(
                names::UPDATE_APPEARANCE,
                mutate_with(&self.api, |api, update: AppearanceUpdate| async move {
                    api.update_appearance_settings(&update).await
                }),
            )
            .invalidates(|_, _| vec![keys::appearance_settings()])
    }

    #[must_use]
    pub fn change_password(&self) -> Mutation<PasswordChange, ()> {
        self.client.mutation(
            names::CHANGE_PASSWORD,
            mutate_with(&self.api, |api, change: PasswordChange| async move {
                api.change_password(&change).await
            }),
        )
    }
}
