// ==========================================
// PassengerApi 集成测试
// ==========================================
// 测试范围:
// 1. 乘客注册: register_passenger
// 2. 乘客查询: find_passenger
// ==========================================

mod helpers;

use air_booking::api::ApiError;
use helpers::api_test_helper::*;

#[test]
fn test_register_passenger_成功() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let passenger = env
        .state
        .passenger_api
        .register_passenger("AB12345678", "Jane Doe", date(1985, 3, 14), "Canada")
        .expect("注册失败");

    assert_eq!(passenger.passenger_id, 1);
    assert_eq!(passenger.passport_number, "AB12345678");
    assert_eq!(passenger.full_name, "Jane Doe");
    assert_eq!(passenger.birth_date, date(1985, 3, 14));
    assert_eq!(env.count("passenger"), 1);
}

#[test]
fn test_register_passenger_ID递增() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let first = env.register("AB12345678");
    let second = env.register("CD12345678");

    assert_eq!(first.passenger_id, 1);
    assert_eq!(second.passenger_id, 2);
}

#[test]
fn test_register_passenger_护照号重复() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.register("AB12345678");

    let result = env.state.passenger_api.register_passenger(
        "AB12345678",
        "Someone Else",
        date(2000, 1, 1),
        "Mexico",
    );

    match result {
        Err(ApiError::DuplicateKey { entity, key }) => {
            assert_eq!(entity, "Passenger");
            assert_eq!(key, "AB12345678");
        }
        other => panic!("Expected DuplicateKey, got {:?}", other),
    }
    assert_eq!(env.count("passenger"), 1);
}

#[test]
fn test_register_passenger_护照号长度错误() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    for passport in ["", "AB123", "AB123456789"] {
        let result = env.state.passenger_api.register_passenger(
            passport,
            "Jane Doe",
            date(1985, 3, 14),
            "Canada",
        );
        assert!(
            matches!(result, Err(ApiError::ValidationError(_))),
            "护照号 {:?} 应被拒绝",
            passport
        );
    }
    assert_eq!(env.count("passenger"), 0);
}

#[test]
fn test_register_passenger_姓名为空() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let result =
        env.state
            .passenger_api
            .register_passenger("AB12345678", "   ", date(1985, 3, 14), "Canada");

    assert!(matches!(result, Err(ApiError::ValidationError(_))));
    assert_eq!(env.count("passenger"), 0);
}

#[test]
fn test_find_passenger_成功() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let registered = env.register("AB12345678");

    let found = env
        .state
        .passenger_api
        .find_passenger("AB12345678")
        .expect("查询失败");

    assert_eq!(found, registered);
}

#[test]
fn test_find_passenger_不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let result = env.state.passenger_api.find_passenger("ZZ99999999");

    assert!(matches!(result, Err(ApiError::NotFound(_))));
}
