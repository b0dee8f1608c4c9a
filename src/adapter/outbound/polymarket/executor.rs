//! Live order placement on the Polymarket CLOB.
//!
//! Orders are built, signed, and posted through the Polymarket SDK. The
//! venue's acknowledgement is reported as `submitted`; fills are never
//! polled afterwards.

use std::str::FromStr;
use std::sync::Arc;

use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use polymarket_client_sdk::auth::state::Authenticated;
use polymarket_client_sdk::auth::{Normal, Signer};
use polymarket_client_sdk::clob::types::Side;
use polymarket_client_sdk::clob::{Client, Config as ClobConfig};
use polymarket_client_sdk::types::U256;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::domain::{OrderAck, OrderId, OrderRequest, OrderSide, OrderStatus};
use crate::error::{ConfigError, ExecutionError, Result};
use crate::port::OrderExecutor;

/// Type alias for the authenticated CLOB client.
type AuthenticatedClient = Client<Authenticated<Normal>>;

/// Decimal places accepted for prices and sizes.
const PRICE_DP: u32 = 2;
const SIZE_DP: u32 = 2;

pub struct PolymarketExecutor {
    client: Arc<AuthenticatedClient>,
    signer: Arc<PrivateKeySigner>,
}

impl PolymarketExecutor {
    /// Authenticate with the CLOB.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is missing or invalid, or if
    /// CLOB authentication fails. Both are fatal at startup.
    pub async fn connect(clob_url: &str, private_key: &str, chain_id: u64) -> Result<Self> {
        if private_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into());
        }

        let signer = PrivateKeySigner::from_str(private_key.trim())
            .map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?
            .with_chain_id(Some(chain_id));

        info!(
            chain_id = chain_id,
            address = %signer.address(),
            "Creating CLOB client"
        );

        let client = Client::new(clob_url, ClobConfig::default())
            .map_err(|e| ExecutionError::AuthFailed(format!("Failed to create CLOB client: {e}")))?
            .authentication_builder(&signer)
            .authenticate()
            .await
            .map_err(|e| ExecutionError::AuthFailed(e.to_string()))?;

        info!("CLOB client authenticated successfully");

        Ok(Self {
            client: Arc::new(client),
            signer: Arc::new(signer),
        })
    }

    async fn submit_order(
        &self,
        token_id: &str,
        side: Side,
        size: Decimal,
        price: Decimal,
    ) -> Result<String> {
        let token_id_u256 =
            U256::from_str(token_id).map_err(|e| ExecutionError::InvalidTokenId {
                token_id: token_id.to_string(),
                reason: e.to_string(),
            })?;

        let order = self
            .client
            .limit_order()
            .token_id(token_id_u256)
            .side(side)
            .price(price)
            .size(size)
            .build()
            .await
            .map_err(|e| ExecutionError::OrderBuildFailed(e.to_string()))?;

        let signed_order = self
            .client
            .sign(self.signer.as_ref(), order)
            .await
            .map_err(|e| ExecutionError::SigningFailed(e.to_string()))?;

        let response = self
            .client
            .post_order(signed_order)
            .await
            .map_err(|e| ExecutionError::SubmissionFailed(e.to_string()))?;

        info!(
            order_id = %response.order_id,
            token_id = token_id,
            side = ?side,
            size = %size,
            price = %price,
            "Order submitted"
        );

        Ok(response.order_id)
    }
}

#[async_trait]
impl OrderExecutor for PolymarketExecutor {
    async fn place_limit(&self, order: &OrderRequest) -> Result<OrderAck> {
        let side = match order.side {
            OrderSide::Buy => Side::Buy,
            OrderSide::Sell => Side::Sell,
        };
        let price = order.price.round_dp(PRICE_DP);
        let size = order
            .size
            .round_dp_with_strategy(SIZE_DP, RoundingStrategy::ToZero);
        if size <= Decimal::ZERO {
            return Err(ExecutionError::OrderRejected(format!(
                "size {} rounds to zero",
                order.size
            ))
            .into());
        }

        let order_id = self
            .submit_order(order.token_id.as_str(), side, size, price)
            .await?;

        Ok(OrderAck::new(
            OrderId::new(order_id),
            OrderStatus::Submitted,
            price,
            size,
        ))
    }

    fn name(&self) -> &'static str {
        "polymarket"
    }
}
