/// The simplification rules that can be applied to an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `2*3 + 1 = 7`
    ///
    /// Rounded to the requested precision, and snapped to `e` or `π` if it rounds to the same
    /// value.
    FoldConstant,

    /// `0+a = a`
    /// `a+0 = a`
    /// `a-0 = a`
    AddZero,

    /// `0-a = -a`
    SubtractFromZero,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `-1*a = -a`
    /// `a*-1 = -a`
    MultiplyMinusOne,

    /// `a/0 = NaN`
    DivideByZero,

    /// `0/a = 0`
    DivideZero,

    /// `a/a = 1`
    DivideSelf,

    /// `a/1 = a`
    DivideOne,

    /// `a/-1 = -a`
    DivideMinusOne,

    /// `-a/b = -(a/b)`
    /// `a/-b = -(a/b)`
    DivideHoistSign,

    /// `0^0 = 1`
    PowerZeroZero,

    /// `0^a = 0`, for `a > 0`
    PowerZeroLeft,

    /// `0^a = NaN`, for `a < 0`
    PowerZeroNegative,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^0 = 0`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `a^-1 = 1/a`
    PowerMinusOne,

    /// `log(a; b) = NaN`, for `a < 0` or `b < 0`
    LogNegative,

    /// `log(1; 0) = 0`
    /// `log(a; 0) = NaN`
    LogBaseZero,

    /// `log(a; 1) = NaN`
    LogBaseOne,

    /// `log(a; a) = 1`
    LogSelf,

    /// `log(a^b; c) = b*log(a; c)`
    LogPowerArgument,

    /// `log(c; a^b) = log(c; a)/b`
    LogPowerBase,

    /// `nrt(a; b) = a^(1/b)`
    RootAsPower,
}
