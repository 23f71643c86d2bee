//! Message catalog. Templates use `{name}` placeholders filled from `Message::params`.
//!
//! Wording is decision support only: templates describe the current data against thresholds
//! and never state an expected price.

use crate::error::InsightError;
use crate::insight::{Message, MessageKey};
use core_types::InsightCategory;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

impl FromStr for Locale {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "pt" | "pt-br" => Ok(Locale::PtBr),
            other => Err(InsightError::UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::PtBr => f.write_str("pt-br"),
        }
    }
}

/// Renders a message in the given locale.
///
/// Placeholders without a matching parameter are left as they are.
pub fn render(message: &Message, locale: Locale) -> String {
    let mut text = template(message.key, locale).to_string();
    for param in &message.params {
        text = text.replace(&format!("{{{}}}", param.name), &param.value);
    }
    text
}

pub fn category_label(category: InsightCategory, locale: Locale) -> &'static str {
    match (locale, category) {
        (Locale::En, InsightCategory::Favorable) => "favorable",
        (Locale::En, InsightCategory::Caution) => "caution",
        (Locale::En, InsightCategory::Neutral) => "neutral",
        (Locale::PtBr, InsightCategory::Favorable) => "favorável",
        (Locale::PtBr, InsightCategory::Caution) => "cautela",
        (Locale::PtBr, InsightCategory::Neutral) => "neutro",
    }
}

pub fn template(key: MessageKey, locale: Locale) -> &'static str {
    match locale {
        Locale::En => template_en(key),
        Locale::PtBr => template_pt_br(key),
    }
}

fn template_en(key: MessageKey) -> &'static str {
    match key {
        MessageKey::PriceLowPercentile => {
            "{basis} at {price} USD/t sits at percentile {percentile} of its recorded history: historically favorable purchase window."
        }
        MessageKey::PriceLowPercentileWithCost => {
            "{basis} at {price} USD/t sits at percentile {percentile} of its recorded history (all-in cost {all_in_cost} {currency}/t): historically favorable purchase window."
        }
        MessageKey::PriceHighPercentile => {
            "{basis} at {price} USD/t sits at percentile {percentile} of its recorded history: historically elevated level, negotiate with caution."
        }
        MessageKey::PriceHighPercentileWithCost => {
            "{basis} at {price} USD/t sits at percentile {percentile} of its recorded history (all-in cost {all_in_cost} {currency}/t): historically elevated level, negotiate with caution."
        }
        MessageKey::StockHigh => {
            "LME stock of {stock} t is above {threshold} t: comfortable supply at present."
        }
        MessageKey::StockLow => {
            "LME stock of {stock} t is below {threshold} t: tight availability can put pressure on premiums."
        }
        MessageKey::CurveContango => {
            "Curve in contango (3M - cash = {spread} USD/t, {spread_pct}%): supply is comfortable and carrying costs are priced into forward dates."
        }
        MessageKey::CurveBackwardation => {
            "Curve in backwardation (3M - cash = {spread} USD/t, {spread_pct}%): indicates near-term supply tightness."
        }
        MessageKey::CurveFlat => {
            "Flat curve (3M - cash = {spread} USD/t, {spread_pct}%): no relevant imbalance between maturities."
        }
        MessageKey::VolatilityHigh => {
            "Volatility of recent log returns is {volatility}, above {threshold}: prices are moving sharply, consider staggering purchases."
        }
        MessageKey::InsufficientData => {
            "Insufficient data for purchase-timing insights; missing: {missing}. Review data sources and assumptions."
        }
        MessageKey::NoActionableSignal => {
            "No purchase-timing threshold was crossed; current metrics sit within the configured bands."
        }
    }
}

fn template_pt_br(key: MessageKey) -> &'static str {
    match key {
        MessageKey::PriceLowPercentile => {
            "{basis} a {price} USD/t está no percentil {percentile} do histórico: janela de compra historicamente favorável."
        }
        MessageKey::PriceLowPercentileWithCost => {
            "{basis} a {price} USD/t está no percentil {percentile} do histórico (custo all-in {all_in_cost} {currency}/t): janela de compra historicamente favorável."
        }
        MessageKey::PriceHighPercentile => {
            "{basis} a {price} USD/t está no percentil {percentile} do histórico: nível historicamente elevado, requer cautela nas negociações."
        }
        MessageKey::PriceHighPercentileWithCost => {
            "{basis} a {price} USD/t está no percentil {percentile} do histórico (custo all-in {all_in_cost} {currency}/t): nível historicamente elevado, requer cautela nas negociações."
        }
        MessageKey::StockHigh => {
            "Estoque LME de {stock} t acima de {threshold} t: oferta confortável no momento."
        }
        MessageKey::StockLow => {
            "Estoque LME de {stock} t abaixo de {threshold} t: disponibilidade reduzida pode pressionar prêmios."
        }
        MessageKey::CurveContango => {
            "Curva em contango (3M - cash = {spread} USD/t, {spread_pct}%): conforto de oferta e custos financeiros maiores nos prazos futuros."
        }
        MessageKey::CurveBackwardation => {
            "Curva em backwardation (3M - cash = {spread} USD/t, {spread_pct}%): sinaliza aperto de oferta no curto prazo."
        }
        MessageKey::CurveFlat => {
            "Curva neutra (3M - cash = {spread} USD/t, {spread_pct}%): sem desequilíbrio relevante entre prazos."
        }
        MessageKey::VolatilityHigh => {
            "Volatilidade dos log-retornos recentes em {volatility}, acima de {threshold}: preços oscilando forte, considere escalonar as compras."
        }
        MessageKey::InsufficientData => {
            "Dados insuficientes para insights de compra; ausentes: {missing}. Revisar fontes de dados e premissas."
        }
        MessageKey::NoActionableSignal => {
            "Nenhum limiar de compra foi atingido; as métricas atuais estão dentro das faixas configuradas."
        }
    }
}
