// ==========================================
// BookingApi 集成测试
// ==========================================
// 测试范围:
// 1. 订座: book_flight（容量、重复、引用实体不存在）
// 2. 订座编号: 格式与冲突重试
// 3. 查询: find_booking, list_bookings
// ==========================================

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use air_booking::api::ApiError;
use air_booking::config::BookingConfig;
use air_booking::domain::BookingReference;
use air_booking::perf::{install_with, PerfGuard, PerfSettings, MAX_WRITES_PER_OPERATION};
use helpers::api_test_helper::*;

// ==========================================
// 订座
// ==========================================

#[test]
fn test_book_flight_成功() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 180);
    let passenger = env.register("AB12345678");

    let reference = env
        .state
        .booking_api
        .book_flight("AB12345678", "AA100", date(2024, 5, 1))
        .expect("订座失败");

    assert_eq!(reference.as_str().len(), BookingReference::LEN);
    assert!(reference
        .as_str()
        .bytes()
        .all(|b| BookingReference::ALPHABET.contains(&b)));

    let booking = env
        .state
        .booking_api
        .find_booking(reference.as_str())
        .expect("查询失败");
    assert_eq!(booking.passenger_id, passenger.passenger_id);
    assert_eq!(booking.flight_number, "AA100");
    assert_eq!(booking.departure_date, date(2024, 5, 1));
}

#[test]
fn test_book_flight_编号互不相同() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 50);
    env.register("AB12345678");

    let mut seen = HashSet::new();
    for day in 1..=20 {
        let reference = env.book("AB12345678", "AA100", date(2024, 6, day));
        assert!(seen.insert(reference), "订座编号重复");
    }
    assert_eq!(env.count("booking"), 20);
}

#[test]
fn test_book_flight_重复订座() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 180);
    let passenger = env.register("AB12345678");
    env.book("AB12345678", "AA100", date(2024, 5, 1));

    let result = env
        .state
        .booking_api
        .book_flight("AB12345678", "AA100", date(2024, 5, 1));

    match result {
        Err(ApiError::DuplicateBooking {
            flight_number,
            passenger_id,
            departure,
        }) => {
            assert_eq!(flight_number, "AA100");
            assert_eq!(passenger_id, passenger.passenger_id);
            assert_eq!(departure, date(2024, 5, 1));
        }
        other => panic!("Expected DuplicateBooking, got {:?}", other),
    }
    assert_eq!(env.count("booking"), 1);
}

#[test]
fn test_book_flight_满座() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 2);
    env.register("AB12345678");
    env.register("CD12345678");
    env.register("EF12345678");

    env.book("AB12345678", "AA100", date(2024, 5, 1));
    env.book("CD12345678", "AA100", date(2024, 5, 1));
    assert_eq!(
        env.state
            .availability_api
            .remaining_seats("AA100", date(2024, 5, 1))
            .unwrap(),
        0
    );

    let result = env
        .state
        .booking_api
        .book_flight("EF12345678", "AA100", date(2024, 5, 1));
    assert!(matches!(
        result,
        Err(ApiError::CapacityExhausted { remaining: 0, .. })
    ));
    assert_eq!(env.count("booking"), 2);

    // 其他日期不受影响
    env.book("EF12345678", "AA100", date(2024, 5, 2));
    assert_eq!(env.count("booking"), 3);
}

#[test]
fn test_book_flight_无订座日期总是可订() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 1);
    env.create_route("AA200", 5);
    env.register("AB12345678");
    env.register("CD12345678");

    // 先写入若干其他订座，记录已有编号
    let earlier: HashSet<String> = [
        env.book("AB12345678", "AA200", date(2030, 12, 30)),
        env.book("CD12345678", "AA200", date(2030, 12, 30)),
        env.book("CD12345678", "AA100", date(2030, 12, 30)),
    ]
    .into_iter()
    .map(BookingReference::into_inner)
    .collect();
    assert_eq!(
        env.state
            .availability_api
            .remaining_seats("AA100", date(2030, 12, 31))
            .unwrap(),
        1
    );

    let reference = env
        .state
        .booking_api
        .book_flight("AB12345678", "AA100", date(2030, 12, 31))
        .expect("订座失败");

    let code = reference.as_str();
    assert_eq!(code.len(), 10);
    assert!(code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert!(!earlier.contains(code), "编号与已有订座重复");

    let same_code = env
        .state
        .store
        .query_scalar(
            "SELECT COUNT(*) FROM booking WHERE booking_ref = ?1",
            [code],
        )
        .unwrap();
    assert_eq!(same_code, 1);
    assert_eq!(env.count("booking"), 4);
}

#[test]
fn test_book_flight_单条写入() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 180);
    env.register("AB12345678");
    {
        let conn = env.state.store.connection();
        let mut conn = conn.lock().unwrap();
        install_with(
            &mut conn,
            PerfSettings {
                enabled: true,
                slow_threshold_ms: 0,
            },
        );
    }

    let guard = PerfGuard::new("book_flight_audit");
    env.book("AB12345678", "AA100", date(2024, 5, 1));
    let counters = guard.counters();

    assert_eq!(counters.writes, MAX_WRITES_PER_OPERATION);
    assert!(counters.reads > 0);
}

#[test]
fn test_book_flight_乘客未注册() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 180);

    let result = env
        .state
        .booking_api
        .book_flight("ZZ99999999", "AA100", date(2024, 5, 1));

    assert!(matches!(result, Err(ApiError::NotFound(_))));
    assert_eq!(env.count("booking"), 0);
}

#[test]
fn test_book_flight_航班不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.register("AB12345678");

    let result = env
        .state
        .booking_api
        .book_flight("AB12345678", "NOPE1", date(2024, 5, 1));

    assert!(matches!(result, Err(ApiError::NotFound(_))));
    assert_eq!(env.count("booking"), 0);
}

#[test]
fn test_book_flight_护照号格式错误() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 180);

    let result = env
        .state
        .booking_api
        .book_flight("SHORT", "AA100", date(2024, 5, 1));

    assert!(matches!(result, Err(ApiError::ValidationError(_))));
}

// ==========================================
// 订座编号冲突
// ==========================================

#[test]
fn test_book_flight_编号冲突后重试() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 180);
    env.register("AB12345678");
    env.register("CD12345678");

    let first_api = env.booking_api_with(
        Arc::new(ScriptedGenerator::new(&["AAAAAAAAAA"], "ZZZZZZZZZZ")),
        BookingConfig::default(),
    );
    let first = first_api
        .book_flight("AB12345678", "AA100", date(2024, 5, 1))
        .expect("订座失败");
    assert_eq!(first.as_str(), "AAAAAAAAAA");

    let second_api = env.booking_api_with(
        Arc::new(ScriptedGenerator::new(
            &["AAAAAAAAAA", "AAAAAAAAAA", "B2B2B2B2B2"],
            "ZZZZZZZZZZ",
        )),
        BookingConfig::default(),
    );
    let second = second_api
        .book_flight("CD12345678", "AA100", date(2024, 5, 1))
        .expect("订座失败");

    assert_eq!(second.as_str(), "B2B2B2B2B2");
    assert_eq!(env.count("booking"), 2);
}

#[test]
fn test_book_flight_编号重试次数耗尽() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 180);
    env.register("AB12345678");
    env.register("CD12345678");

    let config = BookingConfig {
        reference_max_attempts: 3,
        ..BookingConfig::default()
    };
    let api = env.booking_api_with(
        Arc::new(ScriptedGenerator::new(&[], "AAAAAAAAAA")),
        config,
    );

    api.book_flight("AB12345678", "AA100", date(2024, 5, 1))
        .expect("订座失败");
    let result = api.book_flight("CD12345678", "AA100", date(2024, 5, 1));

    assert!(matches!(result, Err(ApiError::InternalError(_))));
    assert_eq!(env.count("booking"), 1);
}

// ==========================================
// 查询
// ==========================================

#[test]
fn test_find_booking_不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let result = env.state.booking_api.find_booking("QQQQQQQQQQ");

    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_list_bookings_按乘客() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_route("AA100", 180);
    env.create_route("AA200", 180);
    env.register("AB12345678");
    env.register("CD12345678");

    env.book("AB12345678", "AA100", date(2024, 5, 1));
    env.book("AB12345678", "AA200", date(2024, 5, 3));
    env.book("CD12345678", "AA100", date(2024, 5, 1));

    let bookings = env
        .state
        .booking_api
        .list_bookings("AB12345678")
        .expect("查询失败");

    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().all(|b| b.passenger_id == 1));
}
