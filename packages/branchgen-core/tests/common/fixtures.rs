//! Kotlin source fixtures

/// Method with a nested if / else-if chain
pub const CALCULATOR: &str = r#"package demo

class Calculator(private val base: Int) {
    fun doWork(a: Int, b: Int): Int {
        if (a > 19) {
            return a + b
        } else if (b == 0) {
            return 0
        }
        return a - b
    }
}
"#;

/// `x` defined at line 5 and used at line 7 of `method:demo.C.f`
pub const DEF_USE: &str = "package demo

class C {
    fun f() {
        val x = 1
        val unused = 2
        println(x)
    }
}
";

/// Subject `when` over 1, 2, 3 without a catch-all
pub const LABEL: &str = r#"package demo.text

fun label(x: Int): String {
    when (x) {
        1 -> return "one"
        2 -> return "two"
        3 -> return "three"
    }
    return "many"
}
"#;

/// Variadic function with a call site elsewhere in the file
pub const VARARG: &str = r#"package demo.math

fun sum(vararg xs: Int): Int = xs.sum()

fun main() {
    val total = sum(1, 2, 3, 4, 5)
    println(total)
}
"#;

/// Object with a string-comparing method
pub const REGISTRY: &str = r#"package demo.registry

object Registry {
    fun describe(key: String): String {
        if (key.isEmpty()) {
            return "empty"
        }
        return "key:" + key
    }
}
"#;
