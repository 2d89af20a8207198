use insta::assert_snapshot;
use routinec::common::error::{Field, RoutineError};
use routinec::common::quote::unquote_identifier;
use routinec::common::types::SqlType;
use routinec::form::*;
use routinec::{Compiled, FormData, RoutineSpec, compile};

fn compile_form(form: &FormData) -> Compiled {
    compile(&RoutineSpec::from_form(form))
}

/// Checks the shape every accepted statement must have.
fn assert_well_formed(compiled: &Compiled, body: &str) {
    assert!(compiled.is_valid(), "{:?}", compiled.errors);
    assert_eq!(compiled.statement.matches("CREATE").count(), 1);
    let depth = compiled
        .statement
        .chars()
        .try_fold(0usize, |depth, c| match c {
            '(' => Some(depth + 1),
            ')' => depth.checked_sub(1),
            _ => Some(depth),
        });
    assert_eq!(depth, Some(0));
    assert!(compiled.statement.ends_with(body));
}

#[test]
fn test_procedure_with_definer() {
    let form = FormData::new()
        .with_scalar(ITEM_NAME, "p r o c")
        .with_scalar(ITEM_RETURN_LENGTH, "")
        .with_scalar(ITEM_RETURN_OPTS_NUM, "")
        .with_scalar(ITEM_RETURN_OPTS_TEXT, "")
        .with_scalar(ITEM_DEFINITION, "SELECT 0;")
        .with_scalar(ITEM_COMMENT, "foo")
        .with_scalar(ITEM_DEFINER, "me@home")
        .with_scalar(ITEM_TYPE, "PROCEDURE")
        .with_scalar("item_num_params", "0")
        .with_list(ITEM_PARAM_DIR, Vec::<String>::new())
        .with_scalar(ITEM_PARAM_NAME, "")
        .with_scalar(ITEM_PARAM_TYPE, "")
        .with_scalar(ITEM_PARAM_LENGTH, "")
        .with_scalar(ITEM_PARAM_OPTS_NUM, "")
        .with_scalar(ITEM_PARAM_OPTS_TEXT, "")
        .with_scalar(ITEM_RETURN_TYPE, "")
        .with_scalar(ITEM_IS_DETERMINISTIC, "")
        .with_scalar(ITEM_SECURITY_TYPE, "INVOKER")
        .with_scalar(ITEM_SQL_DATA_ACCESS, "NO SQL");
    let compiled = compile_form(&form);
    assert_well_formed(&compiled, "SELECT 0;");
    assert_snapshot!(compiled.statement, @"CREATE DEFINER=`me`@`home` PROCEDURE `p r o c`() COMMENT 'foo' DETERMINISTIC NO SQL SQL SECURITY INVOKER SELECT 0;");
}

#[test]
fn test_procedure_with_parameters() {
    let form = FormData::new()
        .with_scalar(ITEM_NAME, "pr``oc")
        .with_scalar(ITEM_DEFINITION, "SELECT 'foobar';")
        .with_scalar(ITEM_COMMENT, "")
        .with_scalar(ITEM_DEFINER, "someuser@somehost")
        .with_scalar(ITEM_TYPE, "PROCEDURE")
        .with_scalar("item_num_params", "2")
        .with_list(ITEM_PARAM_DIR, ["IN", "INOUT"])
        .with_list(ITEM_PARAM_NAME, ["pa`ram", "par 2"])
        .with_list(ITEM_PARAM_TYPE, ["INT", "ENUM"])
        .with_list(ITEM_PARAM_LENGTH, ["10", "'a', 'b'"])
        .with_list(ITEM_PARAM_OPTS_NUM, ["ZEROFILL", ""])
        .with_list(ITEM_PARAM_OPTS_TEXT, ["utf8", "latin1"])
        .with_scalar(ITEM_RETURN_TYPE, "")
        .with_scalar(ITEM_SECURITY_TYPE, "DEFINER")
        .with_scalar(ITEM_SQL_DATA_ACCESS, "foobar");
    let compiled = compile_form(&form);
    assert_well_formed(&compiled, "SELECT 'foobar';");
    assert_snapshot!(compiled.statement, @"CREATE DEFINER=`someuser`@`somehost` PROCEDURE `pr````oc`(IN `pa``ram` INT(10) ZEROFILL, INOUT `par 2` ENUM('a', 'b') CHARSET latin1) NOT DETERMINISTIC SQL SECURITY DEFINER SELECT 'foobar';");
}

#[test]
fn test_function_with_escaped_comment() {
    let form = FormData::new()
        .with_scalar(ITEM_NAME, r"func\")
        .with_scalar(ITEM_RETURN_LENGTH, "5,5")
        .with_scalar(ITEM_RETURN_OPTS_NUM, "UNSIGNED ZEROFILL")
        .with_scalar(ITEM_RETURN_OPTS_TEXT, "")
        .with_scalar(ITEM_DEFINITION, "SELECT 'foobar';")
        .with_scalar(ITEM_COMMENT, "foo's bar")
        .with_scalar(ITEM_DEFINER, "")
        .with_scalar(ITEM_TYPE, "FUNCTION")
        .with_scalar("item_num_params", "1")
        .with_list(ITEM_PARAM_DIR, Vec::<String>::new())
        .with_list(ITEM_PARAM_NAME, ["pa`ram"])
        .with_list(ITEM_PARAM_TYPE, ["VARCHAR"])
        .with_list(ITEM_PARAM_LENGTH, ["45"])
        .with_list(ITEM_PARAM_OPTS_NUM, [""])
        .with_list(ITEM_PARAM_OPTS_TEXT, ["latin1"])
        .with_scalar(ITEM_RETURN_TYPE, "DECIMAL")
        .with_scalar(ITEM_IS_DETERMINISTIC, "ON")
        .with_scalar(ITEM_SECURITY_TYPE, "DEFINER")
        .with_scalar(ITEM_SQL_DATA_ACCESS, "READ SQL DATA");
    let compiled = compile_form(&form);
    assert_well_formed(&compiled, "SELECT 'foobar';");
    assert_snapshot!(compiled.statement, @r"CREATE FUNCTION `func\`(`pa``ram` VARCHAR(45) CHARSET latin1) RETURNS DECIMAL(5,5) UNSIGNED ZEROFILL COMMENT 'foo\'s bar' DETERMINISTIC SQL SECURITY DEFINER SELECT 'foobar';");
}

#[test]
fn test_function_without_parameter_lists() {
    let form = FormData::new()
        .with_scalar(ITEM_NAME, "func")
        .with_scalar(ITEM_RETURN_LENGTH, "20")
        .with_scalar(ITEM_RETURN_OPTS_NUM, "")
        .with_scalar(ITEM_RETURN_OPTS_TEXT, "utf8")
        .with_scalar(ITEM_DEFINITION, "SELECT 0;")
        .with_scalar(ITEM_COMMENT, "")
        .with_scalar(ITEM_DEFINER, "")
        .with_scalar(ITEM_TYPE, "FUNCTION")
        .with_scalar("item_num_params", "1")
        .with_scalar(ITEM_RETURN_TYPE, "VARCHAR")
        .with_scalar(ITEM_SECURITY_TYPE, "DEFINER")
        .with_scalar(ITEM_SQL_DATA_ACCESS, "READ SQL DATA");
    let compiled = compile_form(&form);
    assert_well_formed(&compiled, "SELECT 0;");
    assert_snapshot!(compiled.statement, @"CREATE FUNCTION `func`() RETURNS VARCHAR(20) CHARSET utf8 NOT DETERMINISTIC SQL SECURITY DEFINER SELECT 0;");
}

#[test]
fn test_empty_submission() {
    let compiled = compile_form(&FormData::new());
    assert_eq!(compiled.statement, "CREATE () NOT DETERMINISTIC ");
    assert_eq!(
        compiled.errors,
        vec![
            RoutineError::InvalidEnumValue {
                field: Field::Kind,
                value: "".into()
            },
            RoutineError::MissingField(Field::Name),
            RoutineError::MissingField(Field::Body),
        ]
    );
}

#[test]
fn test_invalid_definer_format() {
    let form = FormData::new()
        .with_scalar(ITEM_NAME, "proc")
        .with_scalar(ITEM_DEFINITION, "SELECT 0;")
        .with_scalar(ITEM_COMMENT, "foo")
        .with_scalar(ITEM_DEFINER, "mehome")
        .with_scalar(ITEM_TYPE, "PROCEDURE")
        .with_scalar("item_num_params", "0")
        .with_scalar(ITEM_PARAM_DIR, "")
        .with_scalar(ITEM_PARAM_NAME, "")
        .with_scalar(ITEM_IS_DETERMINISTIC, "")
        .with_scalar(ITEM_SECURITY_TYPE, "INVOKER")
        .with_scalar(ITEM_SQL_DATA_ACCESS, "NO SQL");
    let compiled = compile_form(&form);
    assert_snapshot!(compiled.statement, @"CREATE PROCEDURE `proc`() COMMENT 'foo' DETERMINISTIC NO SQL SQL SECURITY INVOKER SELECT 0;");
    assert_eq!(
        compiled.errors,
        vec![RoutineError::InvalidFormat {
            field: Field::Definer,
            value: "mehome".into()
        }]
    );
}

#[test]
fn test_invalid_direction_and_missing_enum_values() {
    let form = FormData::new()
        .with_scalar(ITEM_NAME, "proc")
        .with_scalar(ITEM_DEFINITION, "SELECT 0;")
        .with_scalar(ITEM_TYPE, "PROCEDURE")
        .with_scalar("item_num_params", "2")
        .with_list(ITEM_PARAM_DIR, ["FAIL", "INOUT"])
        .with_list(ITEM_PARAM_NAME, ["pa`ram", "goo"])
        .with_list(ITEM_PARAM_TYPE, ["INT", "ENUM"])
        .with_list(ITEM_PARAM_LENGTH, ["10", ""])
        .with_list(ITEM_PARAM_OPTS_NUM, ["ZEROFILL", ""])
        .with_list(ITEM_PARAM_OPTS_TEXT, ["utf8", "latin1"])
        .with_scalar(ITEM_SECURITY_TYPE, "DEFINER")
        .with_scalar(ITEM_SQL_DATA_ACCESS, "foobar");
    let compiled = compile_form(&form);
    assert_snapshot!(compiled.statement, @"CREATE PROCEDURE `proc`((10) ZEROFILL, INOUT `goo` ENUM CHARSET latin1) NOT DETERMINISTIC SQL SECURITY DEFINER SELECT 0;");
    assert_eq!(
        compiled.errors,
        vec![
            RoutineError::InvalidEnumValue {
                field: Field::Direction,
                value: "FAIL".into()
            },
            RoutineError::MissingRequiredOption(SqlType::Enum),
        ]
    );
}

#[test]
fn test_missing_parameter_name_and_return_length() {
    let form = FormData::new()
        .with_scalar(ITEM_NAME, "func")
        .with_scalar(ITEM_RETURN_LENGTH, "")
        .with_scalar(ITEM_RETURN_OPTS_TEXT, "utf8")
        .with_scalar(ITEM_DEFINITION, "SELECT 0;")
        .with_scalar(ITEM_TYPE, "FUNCTION")
        .with_scalar("item_num_params", "2")
        .with_list(ITEM_PARAM_DIR, ["IN"])
        .with_list(ITEM_PARAM_NAME, [""])
        .with_list(ITEM_PARAM_TYPE, ["INT"])
        .with_list(ITEM_PARAM_LENGTH, ["10"])
        .with_list(ITEM_PARAM_OPTS_NUM, ["ZEROFILL"])
        .with_list(ITEM_PARAM_OPTS_TEXT, ["latin1"])
        .with_scalar(ITEM_RETURN_TYPE, "VARCHAR")
        .with_scalar(ITEM_SECURITY_TYPE, "DEFINER")
        .with_scalar(ITEM_SQL_DATA_ACCESS, "");
    let compiled = compile_form(&form);
    assert_snapshot!(compiled.statement, @"CREATE FUNCTION `func`() RETURNS VARCHAR CHARSET utf8 NOT DETERMINISTIC SQL SECURITY DEFINER SELECT 0;");
    assert_eq!(
        compiled.errors,
        vec![
            RoutineError::MissingField(Field::Parameter),
            RoutineError::MissingRequiredOption(SqlType::VarChar),
        ]
    );
}

#[test]
fn test_invalid_return_type() {
    let form = FormData::new()
        .with_scalar(ITEM_NAME, "func")
        .with_scalar(ITEM_DEFINITION, "SELECT 0;")
        .with_scalar(ITEM_TYPE, "FUNCTION")
        .with_scalar("item_num_params", "0")
        .with_scalar(ITEM_RETURN_TYPE, "FAIL")
        .with_scalar(ITEM_SECURITY_TYPE, "DEFINER")
        .with_scalar(ITEM_SQL_DATA_ACCESS, "");
    let compiled = compile_form(&form);
    assert_eq!(
        compiled.statement,
        "CREATE FUNCTION `func`()  NOT DETERMINISTIC SQL SECURITY DEFINER SELECT 0;"
    );
    assert_eq!(
        compiled.errors,
        vec![RoutineError::InvalidEnumValue {
            field: Field::ReturnType,
            value: "FAIL".into()
        }]
    );
}

#[test]
fn test_unknown_data_access_is_silently_dropped() {
    for access in ["foobar", "READ SQL DATA", "no sql"] {
        let form = FormData::new()
            .with_scalar(ITEM_NAME, "p")
            .with_scalar(ITEM_TYPE, "PROCEDURE")
            .with_scalar(ITEM_DEFINITION, "SELECT 1;")
            .with_scalar(ITEM_SQL_DATA_ACCESS, access);
        let compiled = compile_form(&form);
        assert_well_formed(&compiled, "SELECT 1;");
        assert!(!compiled.statement.contains(access));
    }
}

#[test]
fn test_quoted_names_round_trip() {
    for name in ["plain", "p r o c", "pr``oc", "`", r"func\"] {
        let spec = RoutineSpec::procedure(name).with_body("SELECT 1;");
        let statement = compile(&spec).into_result().unwrap();
        let quoted = statement
            .strip_prefix("CREATE PROCEDURE ")
            .and_then(|rest| rest.strip_suffix("() NOT DETERMINISTIC SELECT 1;"))
            .unwrap();
        assert_eq!(unquote_identifier(quoted).unwrap(), name);
    }
}
