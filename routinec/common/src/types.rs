//! SQL data type keywords accepted in routine signatures.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The server family a statement is generated for.
///
/// MariaDB recognizes a few extra data types on top of the MySQL set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ServerFlavor {
    #[default]
    MySql,
    MariaDb,
}

impl ServerFlavor {
    /// Returns `true` if `ty` is a valid column/parameter type on this server.
    #[inline]
    pub fn recognizes(self, ty: SqlType) -> bool {
        match ty {
            SqlType::Inet6 | SqlType::Uuid => self == ServerFlavor::MariaDb,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Number,
    Date,
    Char,
    Spatial,
    Json,
    Uuid,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SqlType {
    // Numeric
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Decimal,
    Float,
    Double,
    Real,
    Bit,
    Boolean,
    Serial,

    // Date and time
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,

    // String
    Char,
    VarChar,
    TinyText,
    Text,
    MediumText,
    LongText,
    Binary,
    VarBinary,
    TinyBlob,
    MediumBlob,
    Blob,
    LongBlob,
    Enum,
    Set,

    // Spatial
    Geometry,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,

    Json,

    // MariaDB only
    Inet6,
    Uuid,
}

impl SqlType {
    pub fn class(self) -> TypeClass {
        use SqlType::*;
        match self {
            TinyInt | SmallInt | MediumInt | Int | BigInt | Decimal | Float | Double | Real
            | Bit | Boolean | Serial => TypeClass::Number,
            Date | DateTime | Timestamp | Time | Year => TypeClass::Date,
            Char | VarChar | TinyText | Text | MediumText | LongText | Binary | VarBinary
            | TinyBlob | MediumBlob | Blob | LongBlob | Enum | Set | Inet6 => TypeClass::Char,
            Geometry | Point | LineString | Polygon | MultiPoint | MultiLineString
            | MultiPolygon | GeometryCollection => TypeClass::Spatial,
            Json => TypeClass::Json,
            Uuid => TypeClass::Uuid,
        }
    }

    /// Returns `true` if a `(length)` group may follow the keyword.
    pub fn accepts_length(self) -> bool {
        use SqlType::*;
        !matches!(
            self,
            Date | Boolean
                | Serial
                | TinyText
                | Text
                | MediumText
                | LongText
                | TinyBlob
                | Blob
                | MediumBlob
                | LongBlob
                | Json
                | Inet6
                | Uuid
        ) && self.class() != TypeClass::Spatial
    }

    /// Returns `true` if the type is unusable without a length or a value list.
    #[inline]
    pub fn requires_length(self) -> bool {
        matches!(
            self,
            SqlType::Enum | SqlType::Set | SqlType::VarChar | SqlType::VarBinary
        )
    }

    #[inline]
    pub fn is_binary_string(self) -> bool {
        matches!(self, SqlType::Binary | SqlType::VarBinary)
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
