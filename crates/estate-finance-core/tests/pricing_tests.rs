use estate_finance_core::pricing::estimate::{
    estimate_property_price, predict_price, PricePredictionInput, SizeTier, MINIMUM_PRICE_LAKHS,
};
use estate_finance_core::pricing::insights::{build_insights, InsightsInput, InvestmentRating};
use estate_finance_core::EstateFinanceError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(location: &str, size: &str, sqft: Decimal) -> PricePredictionInput {
    PricePredictionInput {
        location_name: location.into(),
        size_descriptor: size.into(),
        total_area_sqft: sqft,
    }
}

fn price(location: &str, size: &str, sqft: Decimal) -> Decimal {
    estimate_property_price(&input(location, size, sqft))
        .unwrap()
        .estimated_price_lakhs
}

#[test]
fn test_four_bhk_at_reference_area() {
    assert_eq!(price("Electronic City", "4 BHK", dec!(1000)), dec!(80));
}

#[test]
fn test_multiplier_table() {
    assert_eq!(price("Hebbal", "3 BHK", dec!(1000)), dec!(65));
    assert_eq!(price("Hebbal", "2 BHK", dec!(1000)), dec!(50));
    assert_eq!(price("Hebbal", "1 BHK", dec!(1000)), dec!(35));
    assert_eq!(price("Whitefield", "4 BHK", dec!(1000)), dec!(112));
    assert_eq!(price("Near Jayanagar 4th Block", "3 BHK", dec!(2000)), dec!(182));
}

#[test]
fn test_four_outranks_one_when_both_present() {
    assert_eq!(price("Hebbal", "1-4 BHK", dec!(1000)), dec!(80));
    assert_eq!(
        SizeTier::from_descriptor("14 Bedroom"),
        SizeTier::FourRoom
    );
}

#[test]
fn test_monotonic_in_area() {
    let areas = [
        dec!(0.001),
        dec!(50),
        dec!(199),
        dec!(200),
        dec!(286),
        dec!(500),
        dec!(1000),
        dec!(1234.5),
        dec!(5000),
    ];
    for (location, size) in [("Hebbal", "1 BHK"), ("Koramangala", "3 BHK"), ("Yelahanka", "2 BHK")] {
        let prices: Vec<Decimal> = areas.iter().map(|a| price(location, size, *a)).collect();
        assert!(
            prices.windows(2).all(|w| w[0] <= w[1]),
            "prices not monotonic for {location}/{size}: {prices:?}"
        );
    }
}

#[test]
fn test_floor_near_zero_area() {
    for size in ["1 BHK", "2 BHK", "4 BHK"] {
        assert_eq!(price("Whitefield", size, dec!(0.0001)), MINIMUM_PRICE_LAKHS);
    }
}

#[test]
fn test_estimate_is_idempotent() {
    let i = input("Indiranagar", "3 BHK", dec!(1375));
    assert_eq!(
        estimate_property_price(&i).unwrap(),
        estimate_property_price(&i).unwrap()
    );
}

#[test]
fn test_rejects_non_positive_area() {
    assert!(matches!(
        estimate_property_price(&input("Hebbal", "2 BHK", Decimal::ZERO)),
        Err(EstateFinanceError::InvalidInput { .. })
    ));
}

#[test]
fn test_prediction_feeds_insights() {
    let i = input("Koramangala", "3 BHK", dec!(1500));
    let predicted = predict_price(&i).unwrap().result;
    assert_eq!(predicted.estimated_price_lakhs, dec!(136.5));

    let insights = build_insights(&InsightsInput {
        location_name: i.location_name.clone(),
        size_descriptor: i.size_descriptor.clone(),
        total_area_sqft: i.total_area_sqft,
        predicted_price_lakhs: predicted.estimated_price_lakhs,
        market_average_lakhs: None,
        annual_growth_percent: Some(dec!(9.5)),
    })
    .unwrap()
    .result;
    assert_eq!(insights.current_property.price_per_sqft, predicted.price_per_sqft);
    assert_eq!(insights.market_data.investment_rating, InvestmentRating::Good);
}
