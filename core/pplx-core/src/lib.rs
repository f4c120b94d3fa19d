//! # PPLX — Pull-Based Physical Operators for SQL/PPL
//!
//! PPLX는 SQL/PPL 쿼리 엔진의 물리 실행 계층입니다. 각 연산자는 Volcano 스타일의
//! `has_next()` / `next()` 반복자로 동작하며, 다중값 필드를 행 단위로 펼치는
//! `mvexpand` 연산자를 중심으로 구성됩니다.
//!
//! ## 주요 특징
//!
//! - **mvexpand**: 배열 필드의 각 원소마다 한 행씩 생성, 나머지 필드는 그대로 유지
//! - **Visitor 디스패치**: 플랜 트리 순회 (explain, 검증 등)
//! - **Split 실행**: 스플릿별 독립 트리를 Rayon 스레드 풀에서 실행
//! - **Apache Arrow 출력**: 투영 결과를 `RecordBatch`로 변환
//!
//! ## 빠른 시작
//!
//! ```rust
//! use pplx_core::sql::{MvExpandOperator, ReferenceExpression, ValuesOperator, execute};
//! use pplx_core::ExprValue;
//!
//! # fn main() -> pplx_core::PplxResult<()> {
//! let row = ExprValue::tuple([
//!     ("id", ExprValue::long(1)),
//!     ("tags", ExprValue::array([ExprValue::string("a"), ExprValue::string("b")])),
//! ])?;
//!
//! let input = ValuesOperator::new(vec![row]);
//! let mut plan = MvExpandOperator::new(Box::new(input), ReferenceExpression::new("tags"))?;
//!
//! let rows = execute(&mut plan)?;
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].to_string(), r#"{id:1,tags:"a"}"#);
//! # Ok(())
//! # }
//! ```
//!
//! ## 실행 파이프라인
//!
//! ```text
//! Split → SplitScanOperator → MvExpandOperator → ProjectOperator → Vec<Row> → RecordBatch
//! ```
//!
//! ## 모듈 구조
//!
//! - [`sql`] — 물리 연산자, 실행기, 필드 참조 표현식
//! - [`storage`] — 행 소스와 Split
//! - [`value`] — 행/값 모델 (`ExprValue`, `ExprTuple`)
//! - [`config`] — 실행 설정
//! - [`error`] — 에러 타입

pub mod config;
pub mod error;
pub mod sql;
pub mod storage;
pub mod value;

// Logging utilities
pub mod logging;

// Re-export commonly used types
pub use config::ExecutionConfig;
pub use error::{PplxError, PplxResult};
pub use value::{ExprTuple, ExprValue, Row, ScalarValue};
