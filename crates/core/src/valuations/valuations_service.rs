use std::sync::Arc;

use super::valuations_model::{resolve_price_to_book, NewValuation, Valuation};
use super::valuations_traits::{ValuationRepositoryTrait, ValuationServiceTrait};
use crate::assets::AssetRepositoryTrait;
use crate::errors::Result;

pub struct ValuationService {
    valuation_repository: Arc<dyn ValuationRepositoryTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
}

impl ValuationService {
    pub fn new(
        valuation_repository: Arc<dyn ValuationRepositoryTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
    ) -> Self {
        Self {
            valuation_repository,
            asset_repository,
        }
    }
}

#[async_trait::async_trait]
impl ValuationServiceTrait for ValuationService {
    fn get_valuations(&self, user_id: &str) -> Result<Vec<Valuation>> {
        self.valuation_repository.list(user_id)
    }

    async fn save_valuation(&self, mut new_valuation: NewValuation) -> Result<Valuation> {
        new_valuation.validate()?;
        self.asset_repository
            .get_by_id(&new_valuation.user_id, &new_valuation.asset_id)?;
        new_valuation.price_to_book = resolve_price_to_book(
            new_valuation.price_to_book,
            new_valuation.price,
            new_valuation.book_value_per_share,
        );
        if new_valuation.source.is_none() {
            new_valuation.source = Some("manual".to_string());
        }
        self.valuation_repository.insert(new_valuation).await
    }
}
