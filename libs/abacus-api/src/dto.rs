//! Request and response shapes for the evaluation service.
//!
//! Field names mirror the service's JSON exactly. Only arithmetic and
//! trigonometry are exercised by the input state machine; the remaining
//! shapes complete the declared service surface.

use serde::{Deserialize, Serialize};

use abacus_core::{AngleUnit, MathFunction};

use crate::error::ApiError;

// === Arithmetic ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArithmeticRequest {
    pub expression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArithmeticResponse {
    pub result: f64,
    pub expression: String,
}

// === Trigonometry ===

/// Wire names accepted by the trigonometry endpoint.
///
/// A superset of the keypad's [`MathFunction`]s: the service also handles
/// the hyperbolic family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
}

impl TryFrom<MathFunction> for TrigFunction {
    type Error = ApiError;

    fn try_from(function: MathFunction) -> Result<Self, Self::Error> {
        match function {
            MathFunction::Sin => Ok(Self::Sin),
            MathFunction::Cos => Ok(Self::Cos),
            MathFunction::Tan => Ok(Self::Tan),
            MathFunction::Asin => Ok(Self::Asin),
            MathFunction::Acos => Ok(Self::Acos),
            MathFunction::Atan => Ok(Self::Atan),
            // Square root routes through the arithmetic endpoint.
            MathFunction::Sqrt => Err(ApiError::unexpected(
                "sqrt is not a trigonometric function",
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrigonometryRequest {
    pub function: TrigFunction,
    pub value: f64,
    pub unit: AngleUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrigonometryResponse {
    pub result: f64,
}

// === Logarithms ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFunction {
    Ln,
    Log10,
    /// Arbitrary base; pair with [`LogarithmRequest::base`].
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogarithmRequest {
    pub function: LogFunction,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogarithmResponse {
    pub result: f64,
}

// === Algebra ===

/// Coefficients highest degree first, as the solver expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialRequest {
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialResponse {
    /// Roots as strings; complex roots arrive like `"1+2j"`.
    pub roots: Vec<String>,
    pub polynomial: String,
}

// === Complex numbers ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Operands are strings like `"3+4j"`; the service parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexRequest {
    pub num1: String,
    pub num2: String,
    pub operation: ComplexOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexResponse {
    pub result: String,
    pub calculation: String,
}

// === Calculus ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculusOperation {
    Differentiate,
    Integrate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculusRequest {
    pub expression: String,
    pub operation: CalculusOperation,
    /// Present makes an integration definite over `[lower, upper]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_bounds: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculusResponse {
    /// Symbolic result, or the numeric value for definite integrals.
    pub result: String,
    pub is_definite_integral: bool,
}

// === Matrices ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixOperation {
    Multiply,
    Determinant,
    Inverse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixRequest {
    pub operation: MatrixOperation,
    pub matrix1: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix2: Option<Vec<Vec<f64>>>,
}

/// Determinants come back scalar, everything else as a matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatrixResult {
    Scalar(f64),
    Matrix(Vec<Vec<f64>>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub result: MatrixResult,
}

// === Statistics ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsOperation {
    Mean,
    Median,
    StdDev,
    Variance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsRequest {
    pub operation: StatisticsOperation,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub result: f64,
}

// === Number systems ===

/// Bases the service accepts: 2, 8, 10, or 16. Validation is server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub value: String,
    pub from_base: u8,
    pub to_base: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub result: String,
}

// === Health ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // unwrap() is acceptable in tests
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trigonometry_request_wire_form() {
        let request = TrigonometryRequest {
            function: TrigFunction::Sin,
            value: 30.0,
            unit: AngleUnit::Degrees,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "function": "sin", "value": 30.0, "unit": "degrees" })
        );
    }

    #[test]
    fn test_keypad_function_mapping() {
        assert_eq!(
            TrigFunction::try_from(MathFunction::Atan).unwrap(),
            TrigFunction::Atan
        );
        assert!(TrigFunction::try_from(MathFunction::Sqrt).is_err());
    }

    #[test]
    fn test_log10_wire_name() {
        assert_eq!(
            serde_json::to_string(&LogFunction::Log10).unwrap(),
            "\"log10\""
        );
    }

    #[test]
    fn test_optional_fields_omitted_when_none() {
        let request = LogarithmRequest {
            function: LogFunction::Ln,
            value: 1.0,
            base: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "function": "ln", "value": 1.0 })
        );

        let request = MatrixRequest {
            operation: MatrixOperation::Determinant,
            matrix1: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            matrix2: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("matrix2").is_none());
    }

    #[test]
    fn test_std_dev_wire_name() {
        assert_eq!(
            serde_json::to_string(&StatisticsOperation::StdDev).unwrap(),
            "\"std_dev\""
        );
    }

    #[test]
    fn test_matrix_result_both_shapes() {
        let scalar: MatrixResponse = serde_json::from_value(json!({ "result": -2.0 })).unwrap();
        assert!(matches!(scalar.result, MatrixResult::Scalar(v) if v == -2.0));

        let matrix: MatrixResponse =
            serde_json::from_value(json!({ "result": [[1.0, 0.0], [0.0, 1.0]] })).unwrap();
        assert!(matches!(matrix.result, MatrixResult::Matrix(m) if m.len() == 2));
    }

    #[test]
    fn test_calculus_bounds_roundtrip() {
        let request = CalculusRequest {
            expression: "x**2".to_string(),
            operation: CalculusOperation::Integrate,
            integration_bounds: Some([0.0, 1.0]),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "expression": "x**2",
                "operation": "integrate",
                "integration_bounds": [0.0, 1.0]
            })
        );
    }
}
