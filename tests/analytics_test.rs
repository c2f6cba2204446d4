//! Query library tests over the shared fixture
//!
//! Fixture profits: Alpha 80 + 45 and Beta 40 (Germany), Gamma 30 + 30 and
//! Delta 10 (Brazil), Ghost 0 (unmatched).


use chrono::NaiveDate;
use salesdash::analytics::*;
use salesdash::ledger::{
    CalendarDay, DuplicateKeyPolicy, FactRecord, LedgerFilter, Partner, PlanRow, Product,
    SalesDataset, SourceTables, Staff,
};
use salesdash::temporal::YearMonth;
use test_utils::*;

#[test]
fn test_top_customers_by_category_and_country() {
    let dataset = sample_dataset();
    let view = dataset.ledger().view();

    let report = top_customers(&view, "Women's Shoes", "Germany", DEFAULT_TOP_N);
    let rows = report.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].customer, "Alpha");
    assert_close(rows[0].profit, 125.0);
    assert_eq!(rows[1].customer, "Beta");
    assert_close(rows[1].profit, 40.0);

    assert_eq!(top_customers(&view, "Women's Shoes", "Germany", 1).len(), 1);
    assert!(top_customers(&view, "Women's Shoes", "Brazil", DEFAULT_TOP_N).is_empty());
    assert!(top_customers(&view, "Hats", "Germany", DEFAULT_TOP_N).is_empty());
}

#[test]
fn test_top_n_is_sorted_and_bounded() {
    let date = NaiveDate::from_ymd_opt(2023, 4, 3).unwrap();
    let customers: Vec<String> = (0..15).map(|i| format!("C{:02}", i)).collect();
    let tables = SourceTables {
        facts: customers
            .iter()
            .enumerate()
            .map(|(i, name)| FactRecord {
                order_date: date,
                customer: name.clone(),
                product_id: "1".to_string(),
                employee_id: "10".to_string(),
                quantity: 1.0,
                // three customers share each profit level
                net_sales: (i / 3) as f64 * 10.0 + 10.0,
                ..FactRecord::default()
            })
            .collect(),
        partners: customers.iter().map(|n| Partner::new(n.as_str(), "Italy")).collect(),
        products: vec![Product::new("1", "Scarf", "Accessories")],
        staff: vec![Staff::new("10", "Anna Berg")],
        calendar: vec![CalendarDay::of(date)],
        plan: Vec::new(),
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();
    let view = dataset.ledger().view();

    let report = top_customers(&view, "Accessories", "Italy", DEFAULT_TOP_N);
    assert_eq!(report.len(), 10);
    let profits: Vec<f64> = report.iter().map(|r| r.profit).collect();
    assert!(profits.windows(2).all(|w| w[0] >= w[1]));

    // ties keep customer name order
    let names: Vec<&str> = report.iter().take(3).map(|r| r.customer.as_str()).collect();
    assert_eq!(names, vec!["C12", "C13", "C14"]);

    let products = top_products(&view, "Accessories", DEFAULT_TOP_N);
    assert_eq!(products.len(), 1);
}

#[test]
fn test_pareto_single_customer() {
    let date = NaiveDate::from_ymd_opt(2023, 4, 3).unwrap();
    let fact = |net_sales: f64| FactRecord {
        order_date: date,
        customer: "A".to_string(),
        product_id: "1".to_string(),
        employee_id: "10".to_string(),
        net_sales,
        ..FactRecord::default()
    };
    let tables = SourceTables {
        facts: vec![fact(10.0), fact(5.0)],
        partners: vec![Partner::new("A", "X")],
        ..SourceTables::default()
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();

    let report = pareto_analysis(&dataset.ledger().view(), "X");
    assert_eq!(report.len(), 1);
    let row = &report.rows()[0];
    assert_eq!(row.customer, "A");
    assert_close(row.profit, 15.0);
    assert_close(row.cumulative_profit, 15.0);
    assert_close(row.cumulative_percentage, 100.0);
    assert_close(row.customer_percentage, 100.0);
}

#[test]
fn test_pareto_ranks_customers() {
    let dataset = sample_dataset();
    let view = dataset.ledger().view();

    let report = pareto_analysis(&view, "Brazil");
    let rows = report.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].customer, "Gamma");
    assert_close(rows[0].cumulative_profit, 60.0);
    assert_close(rows[0].cumulative_percentage, 60.0 / 70.0 * 100.0);
    assert_close(rows[0].customer_percentage, 50.0);
    assert_eq!(rows[1].customer, "Delta");
    assert_close(rows[1].cumulative_percentage, 100.0);
    assert_close(rows[1].customer_percentage, 100.0);

    let germany = pareto_analysis(&view, "Germany");
    assert_close(germany.last().unwrap().cumulative_percentage, 100.0);
}

#[test]
fn test_pareto_empty_cases() {
    let dataset = sample_dataset();
    let view = dataset.ledger().view();

    // Spain has a partner but no sales
    assert!(pareto_analysis(&view, "Spain").is_empty());
    assert!(pareto_analysis(&view, "Atlantis").is_empty());

    // a country whose profit nets to zero
    let date = NaiveDate::from_ymd_opt(2023, 4, 3).unwrap();
    let tables = SourceTables {
        facts: vec![
            FactRecord {
                order_date: date,
                customer: "A".to_string(),
                net_sales: 10.0,
                ..FactRecord::default()
            },
            FactRecord {
                order_date: date,
                customer: "B".to_string(),
                supplier_price: 10.0,
                ..FactRecord::default()
            },
        ],
        partners: vec![Partner::new("A", "X"), Partner::new("B", "X")],
        ..SourceTables::default()
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();
    assert!(pareto_analysis(&dataset.ledger().view(), "X").is_empty());
}

#[test]
fn test_pareto_profits_cancelling_to_rounding_noise() {
    let date = NaiveDate::from_ymd_opt(2023, 4, 3).unwrap();
    let fact = |customer: &str, net_sales: f64, supplier_price: f64| FactRecord {
        order_date: date,
        customer: customer.to_string(),
        net_sales,
        supplier_price,
        ..FactRecord::default()
    };
    // 0.1 + 0.2 - 0.3 is 5.55e-17 in floating point, not 0
    let tables = SourceTables {
        facts: vec![fact("A", 0.1, 0.0), fact("B", 0.2, 0.0), fact("C", 0.0, 0.3)],
        partners: vec![
            Partner::new("A", "X"),
            Partner::new("B", "X"),
            Partner::new("C", "X"),
        ],
        ..SourceTables::default()
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();

    assert!(pareto_analysis(&dataset.ledger().view(), "X").is_empty());
}

#[test]
fn test_country_ranking() {
    let dataset = sample_dataset();
    let report = country_ranking(&dataset.ledger().view());
    let rows = report.rows();

    // the unmatched fact has no country and forms no group
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].country, "Germany");
    assert_close(rows[0].total_profit, 165.0);
    assert_close(rows[0].total_sales, 390.0);
    assert_eq!(rows[0].unique_customers, 2);
    assert_eq!(rows[1].country, "Brazil");
    assert_close(rows[1].total_profit, 70.0);
    assert_close(rows[1].total_sales, 170.0);
    assert_eq!(rows[1].unique_customers, 2);
}

#[test]
fn test_manager_sales_ties_keep_name_order() {
    let dataset = sample_dataset();
    let report = manager_sales(&dataset.ledger().view());
    let rows = report.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].employee, "Anna Berg");
    assert_close(rows[0].net_sales, 280.0);
    assert_eq!(rows[1].employee, "Matvey Krylov");
    assert_close(rows[1].net_sales, 280.0);

    let filtered = dataset
        .ledger()
        .filter(&LedgerFilter::new().with_years([2022]));
    let report = manager_sales(&filtered);
    assert_eq!(report.rows()[0].employee, "Anna Berg");
    assert_close(report.rows()[0].net_sales, 200.0);
    assert_close(report.rows()[1].net_sales, 190.0);
}

#[test]
fn test_manager_discounts() {
    let dataset = sample_dataset();
    let report = manager_discounts(&dataset.ledger().view());
    let rows = report.rows();

    assert_eq!(rows.len(), 2);
    let anna = &rows[0];
    assert_eq!(anna.employee, "Anna Berg");
    assert_close(anna.net_sales, 280.0);
    assert_close(anna.discount, 0.15);
    assert_close(anna.quantity, 7.0);
    assert_close(anna.profit, 110.0);
    assert_close(anna.sales_per_unit, 40.0);

    let matvey = &rows[1];
    assert_close(matvey.discount, 0.025);
    assert_close(matvey.profit, 125.0);
}

#[test]
fn test_manager_discounts_zero_quantity() {
    let date = NaiveDate::from_ymd_opt(2023, 4, 3).unwrap();
    let tables = SourceTables {
        facts: vec![FactRecord {
            order_date: date,
            customer: "A".to_string(),
            employee_id: "10".to_string(),
            net_sales: 30.0,
            quantity: 0.0,
            ..FactRecord::default()
        }],
        staff: vec![Staff::new("10", "Anna Berg")],
        ..SourceTables::default()
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();

    let report = manager_discounts(&dataset.ledger().view());
    assert_eq!(report.rows()[0].sales_per_unit, 0.0);
}

#[test]
fn test_weekdays_run_monday_to_sunday() {
    let dataset = sample_dataset();
    let view = dataset.ledger().view();

    let report = productive_weekdays(&view, "Newborn Clothing");
    let days: Vec<(&str, f64)> = report
        .iter()
        .map(|r| (r.day_of_week.as_str(), r.net_sales))
        .collect();
    assert_eq!(days, vec![("Monday", 80.0), ("Sunday", 40.0)]);

    let shoes = productive_weekdays(&view, "Women's Shoes");
    let names: Vec<&str> = shoes.iter().map(|r| r.day_of_week.as_str()).collect();
    assert_eq!(names, vec!["Monday", "Tuesday", "Wednesday"]);

    assert!(productive_weekdays(&view, "Hats").is_empty());
}

#[test]
fn test_weekday_order_ignores_input_order() {
    let sunday = NaiveDate::from_ymd_opt(2023, 1, 8).unwrap();
    let tables = SourceTables {
        // Sunday first, Monday last
        facts: (0..7)
            .map(|offset| FactRecord {
                order_date: sunday - chrono::Duration::days(offset),
                customer: "A".to_string(),
                product_id: "1".to_string(),
                net_sales: 1.0,
                ..FactRecord::default()
            })
            .collect(),
        products: vec![Product::new("1", "Scarf", "Accessories")],
        ..SourceTables::default()
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();

    let report = productive_weekdays(&dataset.ledger().view(), "Accessories");
    let names: Vec<&str> = report.iter().map(|r| r.day_of_week.as_str()).collect();
    assert_eq!(
        names,
        vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
    );
}

#[test]
fn test_products_by_manager() {
    let dataset = sample_dataset();
    let view = dataset.ledger().view();

    let report = products_by_manager(&view, "Matvey Krylov");
    let products: Vec<&str> = report.iter().map(|r| r.product.as_str()).collect();
    assert_eq!(products, vec!["Ankle Boots", "Romper", "Sandals", "Swim Shorts"]);

    let boots = &report.rows()[0];
    assert_eq!(boots.unit_price, Some(110.0));
    assert_close(boots.discount, 0.0);
    assert_close(boots.quantity, 1.0);
    assert_close(boots.net_sales, 100.0);
    assert_close(boots.profit, 40.0);

    assert!(products_by_manager(&view, "Nobody").is_empty());
}

#[test]
fn test_top_products_by_category() {
    let dataset = sample_dataset();
    let view = dataset.ledger().view();

    let report = top_products(&view, "Women's Shoes", DEFAULT_TOP_N);
    let rows = report.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].product, "Ankle Boots");
    assert_close(rows[0].quantity, 3.0);
    assert_close(rows[0].profit, 120.0);
    assert_eq!(rows[1].product, "Sandals");
    assert_close(rows[1].profit, 45.0);

    assert!(top_products(&view, "Hats", DEFAULT_TOP_N).is_empty());
}

#[test]
fn test_product_trend() {
    let dataset = sample_dataset();
    let view = dataset.ledger().view();

    let report = product_trend(&view, "Romper");
    assert_eq!(report.len(), 1);
    let point = &report.rows()[0];
    assert_eq!(point.year, 2023);
    assert_close(point.profit, 40.0);
    assert_close(point.quantity, 7.0);
    assert_close(point.net_sales, 120.0);

    assert!(product_trend(&view, "Unicorn").is_empty());
}

#[test]
fn test_roi_by_year() {
    let dataset = sample_dataset();
    let report = roi_by_year(&dataset.ledger().view());
    let rows = report.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].year, 2022);
    assert_close(rows[0].profit, 165.0);
    assert_close(rows[0].supplier_cost, 225.0);
    assert_close(rows[0].roi, 165.0 / 225.0 * 100.0);
    assert_eq!(rows[1].year, 2023);
    assert_close(rows[1].supplier_cost, 110.0);
}

#[test]
fn test_roi_without_supplier_cost_is_zero() {
    let date = NaiveDate::from_ymd_opt(2021, 7, 1).unwrap();
    let tables = SourceTables {
        facts: vec![FactRecord {
            order_date: date,
            customer: "A".to_string(),
            net_sales: 200.0,
            supplier_price: 0.0,
            ..FactRecord::default()
        }],
        ..SourceTables::default()
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();

    let report = roi_by_year(&dataset.ledger().view());
    assert_eq!(report.len(), 1);
    assert_close(report.rows()[0].profit, 200.0);
    assert_eq!(report.rows()[0].roi, 0.0);
}

#[test]
fn test_plan_vs_actual_outer_joins_months() {
    let dataset = sample_dataset();
    let report = plan_vs_actual(&dataset.ledger().view(), dataset.plan(), &LedgerFilter::new());
    let rows = report.rows();

    let months: Vec<YearMonth> = rows.iter().map(|r| r.month).collect();
    assert_eq!(
        months,
        vec![
            YearMonth::new(2022, 3),
            YearMonth::new(2023, 1),
            YearMonth::new(2023, 2),
            YearMonth::new(2023, 3),
        ]
    );

    let march_2022 = &rows[0];
    assert_close(march_2022.actual_gross, 420.0);
    assert_close(march_2022.actual_net, 390.0);
    assert_close(march_2022.gross_plan, 400.0);
    assert_close(march_2022.gross_performance, 105.0);
    assert_close(march_2022.net_performance, 390.0 / 350.0 * 100.0);

    let january = &rows[1];
    assert_close(january.gross_plan, 200.0);
    assert_close(january.net_plan, 100.0);
    assert_close(january.gross_performance, 100.0);
    assert_close(january.net_performance, 170.0);

    // sales without a plan
    let february = &rows[2];
    assert_close(february.actual_net, 10.0);
    assert_eq!(february.gross_performance, 0.0);
    assert_eq!(february.net_performance, 0.0);

    // a plan without sales
    let march_2023 = &rows[3];
    assert_eq!(march_2023.actual_gross, 0.0);
    assert_close(march_2023.net_plan, 100.0);
    assert_eq!(march_2023.net_performance, 0.0);
}

#[test]
fn test_plan_vs_actual_follows_the_category_selection() {
    let dataset = sample_dataset();
    let filter = LedgerFilter::new().with_categories(["Beachwear"]);
    let view = dataset.ledger().filter(&filter);

    let report = plan_vs_actual(&view, dataset.plan(), &filter);
    let months: Vec<YearMonth> = report.iter().map(|r| r.month).collect();
    // the Women's Shoes plan of 2022-03 is outside the selection
    assert_eq!(months, vec![YearMonth::new(2023, 1), YearMonth::new(2023, 3)]);

    let january = &report.rows()[0];
    assert_close(january.actual_gross, 60.0);
    assert_close(january.actual_net, 50.0);
    // only the Beachwear target, not the Newborn Clothing one
    assert_eq!(january.gross_plan, 0.0);
    assert_close(january.net_plan, 100.0);
    assert_eq!(january.gross_performance, 0.0);
    assert_close(january.net_performance, 50.0);

    let march = &report.rows()[1];
    assert_eq!(march.actual_net, 0.0);
    assert_close(march.gross_plan, 100.0);
}

#[test]
fn test_plan_vs_actual_follows_the_year_selection() {
    let dataset = sample_dataset();
    let filter = LedgerFilter::new().with_years([2022]);
    let view = dataset.ledger().filter(&filter);

    let report = plan_vs_actual(&view, dataset.plan(), &filter);
    assert_eq!(report.len(), 1);
    assert_eq!(report.rows()[0].month, YearMonth::new(2022, 3));
    assert_close(report.rows()[0].gross_performance, 105.0);

    // countries have no plan breakdown, so the plan stays whole
    let germany = LedgerFilter::new().with_countries(["Germany"]);
    let report = plan_vs_actual(&dataset.ledger().filter(&germany), dataset.plan(), &germany);
    assert_eq!(report.len(), 3);
}

#[test]
fn test_plan_rows_without_category_drop_out_of_a_category_selection() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    let month = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let tables = SourceTables {
        plan: vec![
            PlanRow::new(month, 500.0, 400.0),
            PlanRow::new(month, 80.0, 50.0).with_category("Bags"),
        ],
        facts: vec![FactRecord {
            order_date: date,
            customer: "A".to_string(),
            product_id: "1".to_string(),
            gross_sales: 40.0,
            net_sales: 25.0,
            ..FactRecord::default()
        }],
        products: vec![Product::new("1", "Tote", "Bags")],
        ..SourceTables::default()
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();

    let all = plan_vs_actual(&dataset.ledger().view(), dataset.plan(), &LedgerFilter::new());
    assert_close(all.rows()[0].gross_plan, 580.0);

    let bags = LedgerFilter::new().with_categories(["Bags"]);
    let report = plan_vs_actual(&dataset.ledger().filter(&bags), dataset.plan(), &bags);
    assert_close(report.rows()[0].gross_plan, 80.0);
    assert_close(report.rows()[0].gross_performance, 50.0);
    assert_close(report.rows()[0].net_performance, 50.0);
}

#[test]
fn test_plan_vs_actual_zero_plan() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    let tables = SourceTables {
        facts: vec![FactRecord {
            order_date: date,
            customer: "A".to_string(),
            gross_sales: 50.0,
            net_sales: 40.0,
            ..FactRecord::default()
        }],
        plan: vec![PlanRow::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), 0.0, 0.0)],
        ..SourceTables::default()
    };
    let dataset = SalesDataset::from_tables(tables, DuplicateKeyPolicy::Error).unwrap();

    let report = plan_vs_actual(&dataset.ledger().view(), dataset.plan(), &LedgerFilter::new());
    assert_eq!(report.len(), 1);
    assert_eq!(report.rows()[0].gross_performance, 0.0);
    assert_eq!(report.rows()[0].net_performance, 0.0);
}

#[test]
fn test_key_metrics_and_filter_options() {
    let dataset = sample_dataset();
    let ledger = dataset.ledger();

    let metrics = key_metrics(&ledger.view());
    assert_close(metrics.total_profit, 235.0);
    assert_close(metrics.total_net_sales, 570.0);
    assert_eq!(metrics.unique_customers, 5);
    assert_eq!(metrics.transactions, 7);

    let brazil = key_metrics(&ledger.filter(&LedgerFilter::new().with_countries(["Brazil"])));
    assert_eq!(brazil.unique_customers, 2);
    assert_close(brazil.total_profit, 70.0);

    let options = filter_options(&ledger.view());
    assert_eq!(options.years, vec![2022, 2023]);
    assert_eq!(options.countries, vec!["Brazil", "Germany"]);
    assert_eq!(
        options.categories,
        vec!["Beachwear", "Newborn Clothing", "Women's Shoes"]
    );
    assert_eq!(options.employees, vec!["Anna Berg", "Matvey Krylov"]);
}

#[test]
fn test_queries_on_an_empty_selection() {
    let dataset = sample_dataset();
    let filter = LedgerFilter::new().with_years([1999]);
    let view = dataset.ledger().filter(&filter);

    assert!(view.is_empty());
    assert!(country_ranking(&view).is_empty());
    assert!(manager_sales(&view).is_empty());
    assert!(manager_discounts(&view).is_empty());
    assert!(roi_by_year(&view).is_empty());
    assert_eq!(key_metrics(&view).transactions, 0);
    // no plan row falls in 1999 either
    assert!(plan_vs_actual(&view, dataset.plan(), &filter).is_empty());
}

#[test]
fn test_report_output_formats() {
    let dataset = sample_dataset();
    let report = country_ranking(&dataset.ledger().view());

    let text = report.to_text();
    assert!(text.starts_with("country"));
    assert!(text.contains("Germany  165.00"));

    let mut csv = Vec::new();
    report.write_csv(&mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(
        csv.lines().next(),
        Some("country,total_profit,total_sales,unique_customers")
    );
    assert_eq!(csv.lines().nth(1), Some("Germany,165.00,390.00,2"));

    let json = plan_vs_actual(&dataset.ledger().view(), dataset.plan(), &LedgerFilter::new())
        .to_json()
        .unwrap();
    assert!(json.contains("\"month\": \"2022-03\""));
}
