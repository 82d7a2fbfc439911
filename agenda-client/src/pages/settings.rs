//! Business settings screen

use serde_json::Value;
use shared::{Business, DayKey, RangeField};

use crate::error::ClientResult;
use crate::forms::{BusinessForm, FormContext, FormController};
use crate::http::HttpClient;
use crate::messages::{Locale, Text, text};
use crate::repository::{Businesses, Repository};

/// State of the settings screen
pub struct SettingsPage {
    locale: Locale,
    business: Option<Business>,
    form: FormController<BusinessForm>,
}

impl SettingsPage {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            business: None,
            form: FormController::new(BusinessForm::default()),
        }
    }

    pub fn business(&self) -> Option<&Business> {
        self.business.as_ref()
    }

    pub fn form(&self) -> &FormController<BusinessForm> {
        &self.form
    }

    fn form_context(&self) -> FormContext {
        FormContext::new(self.locale, chrono_tz::UTC)
    }

    /// Load the caller's business and reset the form from it.
    pub async fn load<H: HttpClient>(
        &mut self,
        businesses: &Repository<Businesses, H>,
    ) -> ClientResult<Option<&Business>> {
        self.business = businesses.mine().await?;
        let form = self
            .business
            .as_ref()
            .map(BusinessForm::from_business)
            .unwrap_or_default();
        self.form.reset(form);
        Ok(self.business.as_ref())
    }

    /// Apply an arbitrary change to the form.
    pub fn edit(&mut self, change: impl FnOnce(&mut BusinessForm)) {
        let ctx = self.form_context();
        self.form.edit(&ctx, change);
    }

    pub fn toggle_day(&mut self, day: DayKey) {
        self.edit(|f| f.opening_hours.toggle_day(day));
    }

    pub fn set_range_time(&mut self, day: DayKey, index: usize, field: RangeField, value: &str) {
        self.edit(|f| f.opening_hours.set_range_time(day, index, field, value));
    }

    pub fn set_lunch_split(&mut self, day: DayKey, with_lunch: bool) {
        self.edit(|f| f.opening_hours.set_lunch_split(day, with_lunch));
    }

    /// Save the form over the loaded business. Without a loaded business an
    /// error toast is shown and nothing is sent. `None` when nothing was sent.
    pub async fn save<H: HttpClient>(
        &mut self,
        businesses: &Repository<Businesses, H>,
    ) -> Option<ClientResult<Value>> {
        let Some(id) = self.business.as_ref().map(|b| b.id.clone()) else {
            tracing::warn!("Save requested without a loaded business");
            businesses
                .context()
                .notifier
                .error(text(self.locale, Text::NoBusinessToSave));
            return None;
        };

        let ctx = self.form_context();
        let result = self
            .form
            .submit(&ctx, |payload| async move {
                businesses.update(&id, &payload).await
            })
            .await?;

        if result.is_ok()
            && let Err(e) = self.load(businesses).await
        {
            tracing::warn!(error = %e, "Reload after save failed");
        }
        Some(result)
    }
}
